//! Organizations users may reference without a company entry.

/// Company names exempt from the known-company check.
///
/// These appear in affiliations but are not registered as companies.
pub const IGNORED_COMPANIES: &[&str] = &[
    "*robots",
    "April",
    "Chelsio Communications",
    "CloudRunner.io",
    "Datera",
    "Facebook",
    "Fermi National Accelerator Laboratory",
    "Github",
    "H3C",
    "Huaxin Hospital, First Hospital of Tsinghua University",
    "InfluxDB",
    "Kickstarter",
    "National Security Agency",
    "OpenStack Foundation",
    "OpenStack Korea User Group",
    "ProphetStor",
    "SVA System Vertrieb Alexander GmbH",
    "Sencha",
    "Stark & Wayne LLC",
    "Styra",
    "Suranee University of Technology",
    "The Linux Foundation",
    "UTi Worldwide",
    "Undead Labs",
    "Violin Memory",
    "docCloud",
    "npm",
];
