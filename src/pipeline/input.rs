use crate::RiskbriefError;

/// Validated form contents. Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionInput {
    subject_name: String,
    credential: String,
}

impl SubmissionInput {
    pub fn new(subject_name: &str, credential: &str) -> Result<Self, RiskbriefError> {
        let subject_name = subject_name.trim();
        let credential = credential.trim();

        if subject_name.is_empty() || credential.is_empty() {
            return Err(RiskbriefError::Validation);
        }

        Ok(Self {
            subject_name: subject_name.to_string(),
            credential: credential.to_string(),
        })
    }

    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_both_fields() {
        let input = SubmissionInput::new("  Acme \n", "\tsk-123  ").unwrap();
        assert_eq!(input.subject_name(), "Acme");
        assert_eq!(input.credential(), "sk-123");
    }

    #[test]
    fn test_rejects_empty_or_blank_fields() {
        let cases = [("", "sk"), ("Acme", ""), ("   ", "sk"), ("Acme", " \t\n"), ("", "")];
        for (subject, credential) in cases {
            assert!(
                matches!(
                    SubmissionInput::new(subject, credential),
                    Err(RiskbriefError::Validation)
                ),
                "accepted {:?}/{:?}",
                subject,
                credential
            );
        }
    }

    #[test]
    fn test_inner_whitespace_is_kept() {
        let input = SubmissionInput::new(" Acme  Holdings ", "sk").unwrap();
        assert_eq!(input.subject_name(), "Acme  Holdings");
    }
}
