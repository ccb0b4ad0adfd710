//! Built-in policy passages used when no corpus file is configured.

pub const SAMPLE_POLICIES: [(&str, &str); 13] = [
    ("HR-001", "Employees must complete security training annually."),
    ("HR-002", "Remote work requires VPN connection and encrypted devices."),
    (
        "SEC-007",
        "Secrets must not be committed to git. Use a vault like HashiCorp Vault or AWS Secrets Manager.",
    ),
    ("SEC-008", "All API endpoints must use HTTPS with TLS 1.2 or higher."),
    (
        "SEC-009",
        "Password requirements: minimum 12 characters, complexity required, 90-day rotation.",
    ),
    ("IT-101", "MFA is required for administrative access to all systems."),
    (
        "IT-102",
        "Software updates must be applied within 48 hours of release for critical patches.",
    ),
    (
        "IT-103",
        "Data backup verification must occur weekly with documented test restores.",
    ),
    (
        "PRIV-010",
        "PII should be masked in logs and backups. Use tokenization for sensitive data.",
    ),
    ("PRIV-011", "GDPR data subject requests must be fulfilled within 30 days."),
    (
        "PRIV-012",
        "Data retention: customer data kept for 7 years, logs for 1 year.",
    ),
    (
        "COMP-001",
        "SOC 2 Type II compliance required for all customer-facing services.",
    ),
    (
        "COMP-002",
        "All production changes require documented change management approval.",
    ),
];
