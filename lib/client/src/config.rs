use lod_fusion_model::is_valid_string;
use tracing::warn;

/// Why an override entry was dropped during registry construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("the key is empty or all whitespace")]
    BlankKey,
    #[error("the value is empty or all whitespace")]
    BlankValue,
}

/// A single override entry dropped during registry construction.
///
/// A rejection is a diagnostic, not a failure: the entry is skipped and
/// construction continues with the remaining entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRejection {
    /// The key of the dropped entry.
    pub key: String,
    /// Why it was dropped.
    pub reason: RejectReason,
}

/// Splits override entries into accepted pairs and rejections, warning about
/// each rejection as it is found.
pub(crate) fn screen_overrides(
    registry: &'static str,
    overrides: impl IntoIterator<Item = (String, String)>,
) -> (Vec<(String, String)>, Vec<ConfigRejection>) {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for (key, value) in overrides {
        let reason = if !is_valid_string(&key) {
            Some(RejectReason::BlankKey)
        } else if !is_valid_string(&value) {
            Some(RejectReason::BlankValue)
        } else {
            None
        };
        match reason {
            Some(reason) => {
                warn!(registry, key = %key, %reason, "dropping override entry");
                rejected.push(ConfigRejection { key, reason });
            }
            None => accepted.push((key, value)),
        }
    }
    (accepted, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_owned(), value.to_owned())
    }

    #[test]
    fn bad_entries_are_dropped_without_affecting_good_ones() {
        let overrides = vec![
            pair("X", "http://x/sparql"),
            pair("Y", "   "),
            pair("", "http://z/sparql"),
        ];
        let (accepted, rejected) = screen_overrides("endpoints", overrides);

        assert_eq!(accepted, vec![pair("X", "http://x/sparql")]);
        assert_eq!(
            rejected,
            vec![
                ConfigRejection {
                    key: "Y".to_owned(),
                    reason: RejectReason::BlankValue,
                },
                ConfigRejection {
                    key: String::new(),
                    reason: RejectReason::BlankKey,
                },
            ]
        );
    }
}
