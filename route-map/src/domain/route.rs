//! Route identity and metadata.

use std::fmt;

/// Error returned when constructing an invalid route id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route id: {reason}")]
pub struct InvalidRouteId {
    reason: &'static str,
}

/// An upstream route identifier, e.g. `DJB30300002`.
///
/// Route ids are opaque. The only validation is that they must be
/// non-empty once surrounding whitespace is removed.
///
/// # Examples
///
/// ```
/// use route_map::domain::RouteId;
///
/// let id = RouteId::new("DJB30300002").unwrap();
/// assert_eq!(id.as_str(), "DJB30300002");
///
/// assert!(RouteId::new("  ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RouteId(String);

impl RouteId {
    /// Create a route id, trimming surrounding whitespace.
    pub fn new(s: impl AsRef<str>) -> Result<Self, InvalidRouteId> {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InvalidRouteId {
                reason: "route id cannot be empty",
            });
        }
        Ok(RouteId(trimmed.to_string()))
    }

    /// Returns the route id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Service category of a bus route.
///
/// The upstream API reports this as a Korean label. Known labels map to a
/// variant; anything else is kept verbatim in [`RouteType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteType {
    /// 간선버스
    Trunk,
    /// 광역버스
    WideArea,
    /// 지선버스
    Feeder,
    /// 급행버스
    Express,
    /// 심야버스
    Night,
    Other(String),
}

impl RouteType {
    /// Classify an upstream `routetp` label.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "간선버스" => RouteType::Trunk,
            "광역버스" => RouteType::WideArea,
            "지선버스" => RouteType::Feeder,
            "급행버스" => RouteType::Express,
            "심야버스" => RouteType::Night,
            other => RouteType::Other(other.to_string()),
        }
    }

    /// The label shown to users, matching the upstream wording.
    pub fn label(&self) -> &str {
        match self {
            RouteType::Trunk => "간선버스",
            RouteType::WideArea => "광역버스",
            RouteType::Feeder => "지선버스",
            RouteType::Express => "급행버스",
            RouteType::Night => "심야버스",
            RouteType::Other(label) => label,
        }
    }

    /// CSS colour used to theme the route's info box.
    pub fn color(&self) -> &'static str {
        match self {
            RouteType::Trunk => "blue",
            RouteType::WideArea => "red",
            RouteType::Feeder => "green",
            RouteType::Express => "orangered",
            RouteType::Night => "black",
            RouteType::Other(label) if label == "첨단버스" => "skyblue",
            RouteType::Other(_) => "grey",
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A bus route as listed by the route lookup.
///
/// `declared_origin` and `declared_terminus` are the stop names the operator
/// publishes for the route. They are the ground truth the direction
/// reconciler anchors to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub id: RouteId,
    pub number: String,
    pub route_type: RouteType,
    pub declared_origin: String,
    pub declared_terminus: String,
}

impl RouteRecord {
    /// One-line description used when listing candidates.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} ↔ {}",
            self.route_type, self.declared_origin, self.declared_terminus
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_id_trims_and_rejects_empty() {
        assert_eq!(RouteId::new(" DJB1 ").unwrap().as_str(), "DJB1");
        assert!(RouteId::new("").is_err());
        assert!(RouteId::new("\t").is_err());
    }

    #[test]
    fn route_id_debug_and_display() {
        let id = RouteId::new("DJB30300002").unwrap();
        assert_eq!(format!("{id}"), "DJB30300002");
        assert_eq!(format!("{id:?}"), "RouteId(DJB30300002)");
    }

    #[test]
    fn known_labels_classify() {
        assert_eq!(RouteType::from_label("간선버스"), RouteType::Trunk);
        assert_eq!(RouteType::from_label("광역버스"), RouteType::WideArea);
        assert_eq!(RouteType::from_label("지선버스"), RouteType::Feeder);
        assert_eq!(RouteType::from_label("급행버스"), RouteType::Express);
        assert_eq!(RouteType::from_label(" 심야버스 "), RouteType::Night);
    }

    #[test]
    fn unknown_label_is_kept() {
        let t = RouteType::from_label("마을버스");
        assert_eq!(t, RouteType::Other("마을버스".into()));
        assert_eq!(t.label(), "마을버스");
        assert_eq!(t.color(), "grey");
    }

    #[test]
    fn colors() {
        assert_eq!(RouteType::Trunk.color(), "blue");
        assert_eq!(RouteType::WideArea.color(), "red");
        assert_eq!(RouteType::Night.color(), "black");
        assert_eq!(RouteType::from_label("첨단버스").color(), "skyblue");
    }

    #[test]
    fn summary_lists_endpoints() {
        let route = RouteRecord {
            id: RouteId::new("DJB1").unwrap(),
            number: "102".into(),
            route_type: RouteType::Trunk,
            declared_origin: "원내동".into(),
            declared_terminus: "대전역".into(),
        };
        assert_eq!(route.summary(), "간선버스: 원내동 ↔ 대전역");
    }
}
