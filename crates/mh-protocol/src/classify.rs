//! Classification contract shared by both classifier tiers.
//!
//! Both the local rule classifier and the remote model adapter must produce
//! the same `ClassificationResult` shape. Remote output is never trusted
//! as-is: it arrives as a lenient `RawClassification` and goes through the
//! total `coerce` step before anything downstream sees it.

use serde::{Deserialize, Serialize};

/// Maximum number of explanation strings carried on a result.
pub const MAX_REASONS: usize = 6;

/// Target support queue for a classified message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Department {
    /// Identity & discrimination office.
    Idc,
    /// Open (academic) office. Also the safe default for anything unknown.
    #[default]
    Open,
    /// Counseling services.
    Counsel,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Idc => "IDC",
            Department::Open => "OPEN",
            Department::Counsel => "COUNSEL",
        }
    }

    /// Parse the wire form. Exact match only; anything else is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IDC" => Some(Department::Idc),
            "OPEN" => Some(Department::Open),
            "COUNSEL" => Some(Department::Counsel),
            _ => None,
        }
    }
}

/// Final routing decision for a student message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Department the message is routed to.
    pub department: Department,
    /// Confidence in [0.0, 1.0].
    pub confidence: f64,
    /// Short human-readable explanations, at most [`MAX_REASONS`].
    pub reasons: Vec<String>,
    /// Crisis flag. When set, `department` is always `COUNSEL`.
    pub crisis: bool,
}

impl ClassificationResult {
    /// Re-apply the contract invariants.
    ///
    /// The orchestrator calls this as the final step on every path, so no
    /// result can escape with an out-of-range confidence, more than
    /// [`MAX_REASONS`] reasons, or `crisis == true` outside counseling.
    pub fn sanitized(mut self) -> Self {
        if !self.confidence.is_finite() {
            self.confidence = 0.5;
        }
        self.confidence = self.confidence.clamp(0.0, 1.0);
        self.reasons.truncate(MAX_REASONS);
        if self.crisis {
            self.department = Department::Counsel;
        }
        self
    }
}

/// Untrusted classification shape, as the remote model emits it.
///
/// Every field is a raw JSON value so that any well-formed JSON object
/// deserializes; the defaulting rules live in [`RawClassification::coerce`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClassification {
    #[serde(default)]
    pub department: serde_json::Value,
    #[serde(default)]
    pub confidence: serde_json::Value,
    #[serde(default)]
    pub reasons: serde_json::Value,
    #[serde(default)]
    pub crisis: serde_json::Value,
}

impl RawClassification {
    /// Total coercion into the closed contract.
    ///
    /// Defaulting rules:
    /// - department outside {IDC, OPEN, COUNSEL} → OPEN
    /// - non-numeric or non-finite confidence → 0.5, then clamped to [0, 1]
    /// - non-array reasons → empty; non-string elements dropped; capped at 6
    /// - non-boolean crisis → false
    /// - crisis == true → department forced to COUNSEL
    pub fn coerce(self) -> ClassificationResult {
        let department = self
            .department
            .as_str()
            .and_then(Department::parse)
            .unwrap_or_default();

        let confidence = match self.confidence.as_f64() {
            Some(c) if c.is_finite() => c.clamp(0.0, 1.0),
            _ => 0.5,
        };

        let reasons: Vec<String> = match self.reasons.as_array() {
            Some(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .take(MAX_REASONS)
                .collect(),
            None => Vec::new(),
        };

        let crisis = self.crisis.as_bool().unwrap_or(false);

        ClassificationResult {
            department: if crisis { Department::Counsel } else { department },
            confidence,
            reasons,
            crisis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(v: serde_json::Value) -> RawClassification {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn department_wire_form() {
        assert_eq!(
            serde_json::to_string(&Department::Counsel).unwrap(),
            r#""COUNSEL""#
        );
        let d: Department = serde_json::from_str(r#""IDC""#).unwrap();
        assert_eq!(d, Department::Idc);
    }

    #[test]
    fn department_parse_rejects_unknown() {
        assert_eq!(Department::parse("OPEN"), Some(Department::Open));
        assert_eq!(Department::parse("open"), None); // case-sensitive
        assert_eq!(Department::parse("LEGAL"), None);
        assert_eq!(Department::parse(""), None);
    }

    #[test]
    fn coerce_valid_object() {
        let result = raw(json!({
            "department": "IDC",
            "confidence": 0.9,
            "reasons": ["harassment keywords"],
            "crisis": false,
        }))
        .coerce();
        assert_eq!(result.department, Department::Idc);
        assert!((result.confidence - 0.9).abs() < f64::EPSILON);
        assert_eq!(result.reasons, vec!["harassment keywords"]);
        assert!(!result.crisis);
    }

    #[test]
    fn coerce_unknown_department_defaults_to_open() {
        let result = raw(json!({"department": "LEGAL", "confidence": 0.8})).coerce();
        assert_eq!(result.department, Department::Open);
    }

    #[test]
    fn coerce_missing_fields() {
        let result = raw(json!({})).coerce();
        assert_eq!(result.department, Department::Open);
        assert!((result.confidence - 0.5).abs() < f64::EPSILON);
        assert!(result.reasons.is_empty());
        assert!(!result.crisis);
    }

    #[test]
    fn coerce_non_numeric_confidence() {
        let result = raw(json!({"confidence": "very high"})).coerce();
        assert!((result.confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn coerce_out_of_range_confidence_clamped() {
        assert_eq!(raw(json!({"confidence": 3.2})).coerce().confidence, 1.0);
        assert_eq!(raw(json!({"confidence": -0.4})).coerce().confidence, 0.0);
    }

    #[test]
    fn coerce_non_list_reasons_dropped() {
        let result = raw(json!({"reasons": "because"})).coerce();
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn coerce_reasons_capped_and_filtered() {
        let result = raw(json!({
            "reasons": ["a", 1, "b", null, "c", "d", "e", "f", "g"],
        }))
        .coerce();
        assert_eq!(result.reasons.len(), MAX_REASONS);
        assert_eq!(result.reasons[0], "a");
        assert_eq!(result.reasons[1], "b");
    }

    #[test]
    fn coerce_crisis_forces_counsel() {
        let result = raw(json!({"department": "OPEN", "crisis": true})).coerce();
        assert_eq!(result.department, Department::Counsel);
        assert!(result.crisis);
    }

    #[test]
    fn coerce_non_bool_crisis_is_false() {
        // A string "false" must not be treated as truthy.
        let result = raw(json!({"crisis": "false"})).coerce();
        assert!(!result.crisis);
        let result = raw(json!({"crisis": "true"})).coerce();
        assert!(!result.crisis);
    }

    #[test]
    fn sanitized_enforces_crisis_routing() {
        let result = ClassificationResult {
            department: Department::Open,
            confidence: 0.7,
            reasons: vec![],
            crisis: true,
        }
        .sanitized();
        assert_eq!(result.department, Department::Counsel);
    }

    #[test]
    fn sanitized_replaces_nan_confidence() {
        let result = ClassificationResult {
            department: Department::Open,
            confidence: f64::NAN,
            reasons: vec![],
            crisis: false,
        }
        .sanitized();
        assert!((result.confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn sanitized_truncates_reasons() {
        let result = ClassificationResult {
            department: Department::Open,
            confidence: 0.5,
            reasons: (0..10).map(|i| format!("r{i}")).collect(),
            crisis: false,
        }
        .sanitized();
        assert_eq!(result.reasons.len(), MAX_REASONS);
    }

    #[test]
    fn result_json_shape() {
        let result = ClassificationResult {
            department: Department::Counsel,
            confidence: 0.98,
            reasons: vec!["Crisis language detected".into()],
            crisis: true,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["department"], "COUNSEL");
        assert_eq!(json["crisis"], true);
        assert!(json["reasons"].is_array());
    }
}
