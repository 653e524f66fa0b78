//! Rule-based classifier — the local, deterministic fallback tier.
//!
//! A strict priority chain over word-boundary patterns: crisis, then
//! identity-based harm, then academic, then emotional distress, then the
//! Open Office default. Crisis is checked first on purpose: a message that
//! also contains academic or identity keywords must still reach crisis
//! handling. Do not reorder the chain without product sign-off — it changes
//! real routing outcomes.

use regex::Regex;

use super::normalize::normalize;
use mh_protocol::classify::{ClassificationResult, Department};

/// Compiled pattern sets. Built once at startup and shared immutably; the
/// patterns assume already-normalized (lowercased) text.
pub struct RulePatterns {
    crisis: Regex,
    identity: Regex,
    academic: Regex,
    distress: Regex,
}

impl RulePatterns {
    pub fn compile() -> Self {
        // Suicidal ideation, self-harm, wishing to die. Broadest recall net
        // of the four groups.
        let crisis = Regex::new(
            r"\b(suicid(e|al)|end(ing)? my life|kill myself|self[-\s]?harm|harm myself|hurt myself|overdose|i (want|plan) to die|i don'?t want to live)\b",
        );

        // Identity-based discrimination, bullying, harassment.
        let identity = Regex::new(
            r"\b(racist|racial|racism|sexist|sexism|homophob(ic|ia)|transphob(ic|ia)|xenophob(ic|ia)|bully|bullied|bullying|harass(ed|ment)?|discriminat(e|ion|ed)|slur|hate\s*(speech|crime)|bigot(ed|ry)?)\b",
        );

        // Assignments, grades, exams, deadlines, instructors.
        let academic = Regex::new(
            r"\b(assignment(s)?|homework|project(s)?|report(s)?|grade(s)?|mark(s)?|exam(s)?|quiz(zes)?|midterm(s)?|final(s)?|deadline(s)?|extension(s)?|professor|instructor|teacher|ta|course(work)?|syllabus|submit|submission)\b",
        );

        // Emotional distress and wellbeing.
        let distress = Regex::new(
            r"\b(alone|lonely|isolated|anxious|anxiety|stress(ed|ful)?|depress(ed|ion|ive)?|panic|overwhelmed|burn( |-)?out|can'?t focus|sad|cry(ing)?|hopeless|insomnia|can'?t sleep|sleepless)\b",
        );

        match (crisis, identity, academic, distress) {
            (Ok(crisis), Ok(identity), Ok(academic), Ok(distress)) => Self {
                crisis,
                identity,
                academic,
                distress,
            },
            // The patterns are literals; a compile failure is a programming
            // error caught by the tests below.
            _ => unreachable!("rule patterns failed to compile"),
        }
    }
}

impl Default for RulePatterns {
    fn default() -> Self {
        Self::compile()
    }
}

/// Pattern-matching classifier. Pure, total, deterministic.
pub struct RuleClassifier {
    patterns: RulePatterns,
}

impl RuleClassifier {
    pub fn new() -> Self {
        Self {
            patterns: RulePatterns::compile(),
        }
    }

    pub fn with_patterns(patterns: RulePatterns) -> Self {
        Self { patterns }
    }

    /// Classify a message. First match wins; later groups are never checked
    /// once an earlier one matches.
    pub fn classify(&self, message: &str) -> ClassificationResult {
        let text = normalize(message);

        if self.patterns.crisis.is_match(&text) {
            return ClassificationResult {
                department: Department::Counsel,
                confidence: 0.98,
                reasons: vec!["Crisis language detected".into()],
                crisis: true,
            };
        }

        if self.patterns.identity.is_match(&text) {
            return ClassificationResult {
                department: Department::Idc,
                confidence: 0.9,
                reasons: vec!["Identity-based harm / bullying keywords".into()],
                crisis: false,
            };
        }

        if self.patterns.academic.is_match(&text) {
            return ClassificationResult {
                department: Department::Open,
                confidence: 0.85,
                reasons: vec!["Academic / course keywords".into()],
                crisis: false,
            };
        }

        if self.patterns.distress.is_match(&text) {
            return ClassificationResult {
                department: Department::Counsel,
                confidence: 0.85,
                reasons: vec!["Emotional distress keywords".into()],
                crisis: false,
            };
        }

        ClassificationResult {
            department: Department::Open,
            confidence: 0.5,
            reasons: vec!["No strong signals; defaulting to Open Office".into()],
            crisis: false,
        }
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new()
    }
}
