//! Regional service hosts for the product data endpoints.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Regions with a product data endpoint, keyed by two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Ca,
    Cn,
    De,
    Es,
    Fr,
    It,
    Jp,
    Uk,
    Us,
}

impl Region {
    /// Returns the host pair for this region.
    pub fn endpoint(&self) -> Endpoint {
        let (query_host, alternate_host) = match self {
            Region::Ca => ("ecs.amazonaws.ca", "xml-ca.amznxslt.com"),
            Region::Cn => ("webservices.amazon.cn", "xml-cn.amznxslt.com"),
            Region::De => ("ecs.amazonaws.de", "xml-de.amznxslt.com"),
            Region::Es => ("webservices.amazon.es", "xml-es.amznxslt.com"),
            Region::Fr => ("ecs.amazonaws.fr", "xml-fr.amznxslt.com"),
            Region::It => ("webservices.amazon.it", "xml-it.amznxslt.com"),
            Region::Jp => ("ecs.amazonaws.jp", "xml-jp.amznxslt.com"),
            Region::Uk => ("ecs.amazonaws.co.uk", "xml-uk.amznxslt.com"),
            Region::Us => ("ecs.amazonaws.com", "xml-us.amznxslt.com"),
        };

        Endpoint {
            query_host: query_host.to_string(),
            alternate_host: Some(alternate_host.to_string()),
        }
    }

    /// Returns the canonical two-letter code for this region.
    pub fn code(&self) -> &'static str {
        match self {
            Region::Ca => "CA",
            Region::Cn => "CN",
            Region::De => "DE",
            Region::Es => "ES",
            Region::Fr => "FR",
            Region::It => "IT",
            Region::Jp => "JP",
            Region::Uk => "UK",
            Region::Us => "US",
        }
    }

    /// Returns all supported regions.
    pub fn all() -> &'static [Region] {
        &[
            Region::Ca,
            Region::Cn,
            Region::De,
            Region::Es,
            Region::Fr,
            Region::It,
            Region::Jp,
            Region::Uk,
            Region::Us,
        ]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CA" => Ok(Region::Ca),
            "CN" => Ok(Region::Cn),
            "DE" => Ok(Region::De),
            "ES" => Ok(Region::Es),
            "FR" => Ok(Region::Fr),
            "IT" => Ok(Region::It),
            "JP" => Ok(Region::Jp),
            "UK" => Ok(Region::Uk),
            "US" => Ok(Region::Us),
            _ => Err(ConfigError::UnknownRegion(s.to_string())),
        }
    }
}

/// Host pair for one region. Requests go to the query host; the alternate
/// host serves the XSLT-transformed variant and is carried for completeness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    query_host: String,
    alternate_host: Option<String>,
}

impl Endpoint {
    /// Creates an endpoint with an arbitrary query host (testing, alternate
    /// deployments). The host may include a port.
    pub fn custom(host: impl Into<String>) -> Self {
        Self { query_host: host.into(), alternate_host: None }
    }

    /// Returns the host requests are sent to and signed against.
    pub fn query_host(&self) -> &str {
        &self.query_host
    }

    /// Returns the alternate host, if this endpoint has one.
    pub fn alternate_host(&self) -> Option<&str> {
        self.alternate_host.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parsing_all() {
        assert_eq!(Region::from_str("CA").unwrap(), Region::Ca);
        assert_eq!(Region::from_str("CN").unwrap(), Region::Cn);
        assert_eq!(Region::from_str("DE").unwrap(), Region::De);
        assert_eq!(Region::from_str("ES").unwrap(), Region::Es);
        assert_eq!(Region::from_str("FR").unwrap(), Region::Fr);
        assert_eq!(Region::from_str("IT").unwrap(), Region::It);
        assert_eq!(Region::from_str("JP").unwrap(), Region::Jp);
        assert_eq!(Region::from_str("UK").unwrap(), Region::Uk);
        assert_eq!(Region::from_str("US").unwrap(), Region::Us);

        // Case insensitive
        assert_eq!(Region::from_str("de").unwrap(), Region::De);
        assert_eq!(Region::from_str("Us").unwrap(), Region::Us);

        // Invalid
        assert!(Region::from_str("XX").is_err());
        assert!(Region::from_str("").is_err());
        assert!(Region::from_str("germany").is_err());
    }

    #[test]
    fn test_region_parse_error_display() {
        let err = Region::from_str("xy").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("xy"));
        assert!(msg.contains("UK"));
    }

    #[test]
    fn test_region_hosts_all() {
        assert_eq!(Region::Ca.endpoint().query_host(), "ecs.amazonaws.ca");
        assert_eq!(Region::Cn.endpoint().query_host(), "webservices.amazon.cn");
        assert_eq!(Region::De.endpoint().query_host(), "ecs.amazonaws.de");
        assert_eq!(Region::Es.endpoint().query_host(), "webservices.amazon.es");
        assert_eq!(Region::Fr.endpoint().query_host(), "ecs.amazonaws.fr");
        assert_eq!(Region::It.endpoint().query_host(), "webservices.amazon.it");
        assert_eq!(Region::Jp.endpoint().query_host(), "ecs.amazonaws.jp");
        assert_eq!(Region::Uk.endpoint().query_host(), "ecs.amazonaws.co.uk");
        assert_eq!(Region::Us.endpoint().query_host(), "ecs.amazonaws.com");
    }

    #[test]
    fn test_region_alternate_hosts() {
        assert_eq!(Region::De.endpoint().alternate_host(), Some("xml-de.amznxslt.com"));
        assert_eq!(Region::Us.endpoint().alternate_host(), Some("xml-us.amznxslt.com"));
    }

    #[test]
    fn test_region_all() {
        let all = Region::all();
        assert_eq!(all.len(), 9);
        assert!(all.contains(&Region::Ca));
        assert!(all.contains(&Region::Us));

        // Every listed region parses back from its own code.
        for region in all {
            assert_eq!(Region::from_str(region.code()).unwrap(), *region);
        }
    }

    #[test]
    fn test_region_display() {
        assert_eq!(Region::De.to_string(), "DE");
        assert_eq!(Region::Uk.to_string(), "UK");
    }

    #[test]
    fn test_custom_endpoint() {
        let endpoint = Endpoint::custom("127.0.0.1:9090");
        assert_eq!(endpoint.query_host(), "127.0.0.1:9090");
        assert!(endpoint.alternate_host().is_none());
    }
}
