//! Antispam report fields and the two Microsoft header dialects.
//!
//! Both `X-Microsoft-Antispam` and `X-Forefront-Antispam-Report` carry the
//! same semicolon-delimited `KEY:value;` microformat. Each dialect is
//! declared here as a static field list; the parser itself
//! ([`crate::parser::antispam`]) is dialect-agnostic.

/// Static declaration of one known report field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Microformat key as it appears in the report (matched case-insensitively).
    pub key: &'static str,
    /// Human-readable label for display.
    pub label: &'static str,
}

/// Synthetic field holding the verbatim report text.
pub const SOURCE_KEY: &str = "source";
/// Synthetic field accumulating `KEY:value;` segments with unknown keys.
pub const UNPARSED_KEY: &str = "unparsed";

/// The compact `X-Microsoft-Antispam` dialect.
pub const MICROSOFT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "BCL",
        label: "Bulk Complaint Level",
    },
    FieldSpec {
        key: "PCL",
        label: "Phishing Confidence Level",
    },
];

/// The richer `X-Forefront-Antispam-Report` dialect.
pub const FOREFRONT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "ARC",
        label: "ARC protocol",
    },
    FieldSpec {
        key: "CTRY",
        label: "Country/Region",
    },
    FieldSpec {
        key: "LANG",
        label: "Language",
    },
    FieldSpec {
        key: "SCL",
        label: "Spam Confidence Level",
    },
    FieldSpec {
        key: "PCL",
        label: "Phishing Confidence Level",
    },
    FieldSpec {
        key: "SFV",
        label: "Spam Filtering Verdict",
    },
    FieldSpec {
        key: "IPV",
        label: "IP Filter Verdict",
    },
    FieldSpec {
        key: "H",
        label: "HELO/EHLO String",
    },
    FieldSpec {
        key: "PTR",
        label: "PTR Record",
    },
    FieldSpec {
        key: "CIP",
        label: "Connecting IP Address",
    },
    FieldSpec {
        key: "CAT",
        label: "Protection Policy Category",
    },
    FieldSpec {
        key: "SFTY",
        label: "Phishing message",
    },
    FieldSpec {
        key: "SRV",
        label: "Bulk email status",
    },
    FieldSpec {
        key: "X-CustomSpam",
        label: "Advanced Spam Filtering",
    },
    FieldSpec {
        key: "SFS",
        label: "Spam rules",
    },
];

/// One report field with its parsed value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AntiSpamField {
    /// Microformat key (`"BCL"`, `"SCL"`, … or a synthetic key).
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Header this field was read from.
    pub source_header_name: String,
    /// Parsed value; empty when the key was absent from the report.
    pub value: String,
}

/// A parsed antispam report: the declared field set of one dialect plus the
/// synthetic `source` and `unparsed` fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AntiSpamReport {
    /// All fields, declaration order; `source` and `unparsed` come last.
    pub fields: Vec<AntiSpamField>,
}

impl AntiSpamReport {
    /// Fresh report for the `X-Microsoft-Antispam` dialect.
    pub fn microsoft() -> Self {
        Self::from_specs(MICROSOFT_FIELDS, "X-Microsoft-Antispam")
    }

    /// Fresh report for the `X-Forefront-Antispam-Report` dialect.
    pub fn forefront() -> Self {
        Self::from_specs(FOREFRONT_FIELDS, "X-Forefront-Antispam-Report")
    }

    /// Build the field set for a declared dialect, appending the synthetic
    /// `source` and `unparsed` entries.
    pub fn from_specs(specs: &[FieldSpec], header_name: &str) -> Self {
        let mut fields: Vec<AntiSpamField> = specs
            .iter()
            .map(|spec| AntiSpamField {
                key: spec.key.to_string(),
                label: spec.label.to_string(),
                source_header_name: header_name.to_string(),
                value: String::new(),
            })
            .collect();
        fields.push(AntiSpamField {
            key: SOURCE_KEY.to_string(),
            label: "Source header".to_string(),
            source_header_name: header_name.to_string(),
            value: String::new(),
        });
        fields.push(AntiSpamField {
            key: UNPARSED_KEY.to_string(),
            label: "Unknown fields".to_string(),
            source_header_name: header_name.to_string(),
            value: String::new(),
        });
        Self { fields }
    }

    /// Look up a field by key, case-insensitively.
    pub fn get(&self, key: &str) -> Option<&AntiSpamField> {
        self.fields.iter().find(|f| f.key.eq_ignore_ascii_case(key))
    }

    /// Mutable lookup by key, case-insensitively.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut AntiSpamField> {
        self.fields
            .iter_mut()
            .find(|f| f.key.eq_ignore_ascii_case(key))
    }

    /// Value of a field, or `""` when the key is unknown.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).map(|f| f.value.as_str()).unwrap_or("")
    }

    /// `true` iff any declared (non-synthetic) field carries a value.
    pub fn exists(&self) -> bool {
        self.fields
            .iter()
            .any(|f| f.key != SOURCE_KEY && f.key != UNPARSED_KEY && !f.value.is_empty())
    }
}
