use serde::{Deserialize, Serialize};

/// Accepted input kind for a tool's target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Url,
    Host,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub kind: InputKind,
    pub required_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_fields: Option<Vec<String>>,
}

/// One entry in the scan tool catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub category: String,
    pub description: String,
    pub input_schema: InputSchema,
    #[serde(default)]
    pub requires_consent: bool,
}

fn strings(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|s| s.to_string()).collect()
}

/// The registered scan tools. Mirrors what the execution backend exposes.
pub fn registered_tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "nmap".to_string(),
            category: "Network Scanning".to_string(),
            description: "Network discovery and security auditing tool".to_string(),
            input_schema: InputSchema {
                kind: InputKind::Host,
                required_fields: strings(&["target"]),
                optional_fields: Some(strings(&["ports", "scan_type"])),
            },
            requires_consent: true,
        },
        ToolSpec {
            name: "ssl_check".to_string(),
            category: "Web Security".to_string(),
            description: "SSL/TLS certificate and configuration analysis".to_string(),
            input_schema: InputSchema {
                kind: InputKind::Url,
                required_fields: strings(&["target"]),
                optional_fields: None,
            },
            requires_consent: false,
        },
        ToolSpec {
            name: "headers_audit".to_string(),
            category: "Web Security".to_string(),
            description: "HTTP security headers analysis".to_string(),
            input_schema: InputSchema {
                kind: InputKind::Url,
                required_fields: strings(&["target"]),
                optional_fields: None,
            },
            requires_consent: false,
        },
        ToolSpec {
            name: "malware_scan".to_string(),
            category: "File Analysis".to_string(),
            description: "File malware detection and analysis".to_string(),
            input_schema: InputSchema {
                kind: InputKind::File,
                required_fields: strings(&["file"]),
                optional_fields: None,
            },
            requires_consent: false,
        },
    ]
}

pub fn resolve_tool(name: &str) -> Option<ToolSpec> {
    registered_tools().into_iter().find(|t| t.name == name)
}
