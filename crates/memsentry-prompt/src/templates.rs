//! Fixed prompt sections.

pub const ROLE: &str = "You are a security expert and code analyst.";

/// Review dimensions, in the order the model is asked to cover them.
pub const ANALYSIS_DIMENSIONS: &[&str] = &[
    "Security vulnerabilities (SQL injection, XSS, buffer overflow, etc.)",
    "Memory leaks and resource management issues",
    "Unsafe practices and potential exploits",
    "Input validation issues",
    "Error handling gaps",
];

/// Fields every reported issue must carry.
pub const REQUIRED_FIELDS: &[&str] = &[
    "Issue Type (Vulnerability/Memory Leak/Code Smell)",
    "Severity (Critical/High/Medium/Low)",
    "Location (line number if identifiable)",
    "Description",
    "Recommended Fix",
];

pub fn render_role() -> String {
    format!("{} Analyze the following code for:", ROLE)
}

pub fn render_dimensions() -> String {
    ANALYSIS_DIMENSIONS
        .iter()
        .enumerate()
        .map(|(i, dimension)| format!("{}. {}", i + 1, dimension))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_target(content: &str) -> String {
    format!("Code to analyze:\n{}", content)
}

pub fn render_required_fields() -> String {
    let fields = REQUIRED_FIELDS
        .iter()
        .map(|field| format!("- {}", field))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Provide a detailed report with:\n{}", fields)
}
