/// Category for names no keyword matches
pub const DEFAULT_CATEGORY: &str = "system-info";

/// Ordered `(keyword, category)` pairs, matched against the lowercased API
/// name top to bottom. The first hit wins, so more specific keywords must come
/// before generic ones.
const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("battery", "battery-power"),
    ("charging", "battery-power"),
    ("powerstate", "battery-power"),
    ("lowpower", "battery-power"),
    ("ipaddress", "network"),
    ("macaddress", "network"),
    ("carrier", "network"),
    ("airplane", "network"),
    ("wifi", "network"),
    ("network", "network"),
    ("memory", "memory-storage"),
    ("disk", "memory-storage"),
    ("storage", "memory-storage"),
    ("camera", "hardware"),
    ("headphone", "hardware"),
    ("fingerprint", "hardware"),
    ("sensor", "hardware"),
    ("hardware", "hardware"),
    ("location", "location"),
    ("uniqueid", "device-identity"),
    ("deviceid", "device-identity"),
    ("androidid", "device-identity"),
    ("serial", "device-identity"),
    ("model", "device-identity"),
    ("brand", "device-identity"),
    ("manufacturer", "device-identity"),
    ("devicename", "device-identity"),
    ("devicetype", "device-identity"),
    ("tablet", "device-identity"),
    ("applicationname", "application"),
    ("bundleid", "application"),
    ("readableversion", "application"),
    ("buildnumber", "application"),
    ("install", "application"),
    ("version", "application"),
    ("useragent", "application"),
    ("emulator", "system-info"),
    ("system", "system-info"),
    ("apilevel", "system-info"),
    ("fontscale", "system-info"),
];

/// Categories an index for the full library is expected to cover
pub const EXPECTED_CATEGORIES: &[&str] = &[
    "application",
    "battery-power",
    "device-identity",
    "hardware",
    "location",
    "memory-storage",
    "network",
    "system-info",
];

/// Category for an API name, falling back to [`DEFAULT_CATEGORY`]
pub fn categorize(api_name: &str) -> &'static str {
    let name = api_name.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|&(_, category)| category)
        .unwrap_or(DEFAULT_CATEGORY)
}
