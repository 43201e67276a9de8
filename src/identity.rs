//! Simulated browser identities.
//!
//! A client picks one identity at construction and sends its user agent with
//! every request for the rest of its life.

use rand::seq::SliceRandom;
use rand::Rng;

/// Identities a client can present, as `family_version`.
pub const IDENTITIES: &[&str] = &[
    "chrome_100",
    "chrome_101",
    "chrome_104",
    "chrome_105",
    "chrome_106",
    "chrome_107",
    "chrome_108",
    "chrome_109",
    "chrome_114",
    "chrome_116",
    "chrome_117",
    "chrome_118",
    "chrome_119",
    "chrome_120",
    "chrome_123",
    "chrome_124",
    "chrome_126",
    "chrome_127",
    "chrome_128",
    "chrome_129",
    "chrome_130",
    "chrome_131",
    "safari_ios_16.5",
    "safari_ios_17.2",
    "safari_ios_17.4.1",
    "safari_ios_18.1.1",
    "safari_15.3",
    "safari_15.5",
    "safari_15.6.1",
    "safari_16",
    "safari_16.5",
    "safari_17.0",
    "safari_17.2.1",
    "safari_17.4.1",
    "safari_17.5",
    "safari_18",
    "safari_18.2",
    "safari_ipad_18",
    "edge_101",
    "edge_122",
    "edge_127",
    "edge_131",
    "firefox_109",
    "firefox_117",
    "firefox_128",
    "firefox_133",
];

/// A fixed simulated client signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    name: &'static str,
    user_agent: String,
}

impl ClientIdentity {
    /// Picks a random identity from [`IDENTITIES`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let name = IDENTITIES.choose(rng).copied().unwrap_or("chrome_131");
        Self::from_name(name)
    }

    /// Builds the identity for a catalogue entry such as `"firefox_133"`.
    pub fn from_name(name: &'static str) -> Self {
        Self {
            name,
            user_agent: user_agent_for(name),
        }
    }

    /// Catalogue name, e.g. `"safari_17.5"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// User-Agent header value.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

fn user_agent_for(name: &str) -> String {
    let (family, version) = name.rsplit_once('_').unwrap_or((name, ""));
    let major = version.split('.').next().unwrap_or(version);
    let webkit = "AppleWebKit/605.1.15 (KHTML, like Gecko)";

    match family {
        "chrome" => format!(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{}.0.0.0 Safari/537.36",
            major
        ),
        "edge" => format!(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{0}.0.0.0 Safari/537.36 Edg/{0}.0.0.0",
            major
        ),
        "firefox" => format!(
            "Mozilla/5.0 (X11; Linux x86_64; rv:{0}.0) Gecko/20100101 Firefox/{0}.0",
            major
        ),
        "safari_ios" => format!(
            "Mozilla/5.0 (iPhone; CPU iPhone OS {} like Mac OS X) {} Version/{} Mobile/15E148 Safari/604.1",
            version.replace('.', "_"),
            webkit,
            version
        ),
        "safari_ipad" => format!(
            "Mozilla/5.0 (iPad; CPU OS {} like Mac OS X) {} Version/{} Mobile/15E148 Safari/604.1",
            version.replace('.', "_"),
            webkit,
            version
        ),
        _ => format!(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) {} Version/{} Safari/605.1.15",
            webkit, version
        ),
    }
}
