use lifelab::core::models::geometry::CellVec;
use lifelab::workflows::run::Placement;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Invalid placement format for '{0}'. Expected 'category/name@x,y' (e.g., 'spaceships/glider@10,10')."
    )]
    InvalidPlacementFormat(String),

    #[error("Invalid coordinate '{value}' in placement '{spec}'.")]
    InvalidCoordinate { spec: String, value: String },

    #[error("Component '{component}' cannot be empty in placement '{spec}'.")]
    EmptyComponent {
        component: &'static str,
        spec: String,
    },
}

/// Parses a `category/name@x,y` placement spec as given on the command line.
pub fn parse_placement(spec: &str) -> Result<Placement, ParseError> {
    let (pattern, coords) = spec
        .split_once('@')
        .ok_or_else(|| ParseError::InvalidPlacementFormat(spec.to_string()))?;
    let (category, name) = pattern
        .split_once('/')
        .ok_or_else(|| ParseError::InvalidPlacementFormat(spec.to_string()))?;

    if category.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "category",
            spec: spec.to_string(),
        });
    }
    if name.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "name",
            spec: spec.to_string(),
        });
    }

    let (x_str, y_str) = coords
        .split_once(',')
        .ok_or_else(|| ParseError::InvalidPlacementFormat(spec.to_string()))?;

    let parse_coord = |value: &str| -> Result<i32, ParseError> {
        value.trim().parse().map_err(|_| ParseError::InvalidCoordinate {
            spec: spec.to_string(),
            value: value.to_string(),
        })
    };

    Ok(Placement {
        category: category.to_string(),
        name: name.to_string(),
        position: CellVec::new(parse_coord(x_str)?, parse_coord(y_str)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_spec() {
        let placement = parse_placement("spaceships/glider@10,20").unwrap();
        assert_eq!(placement.category, "spaceships");
        assert_eq!(placement.name, "glider");
        assert_eq!(placement.position, CellVec::new(10, 20));
    }

    #[test]
    fn accepts_negative_coordinates_and_whitespace() {
        let placement = parse_placement("still_lifes/block@-1, 3").unwrap();
        assert_eq!(placement.position, CellVec::new(-1, 3));
    }

    #[test]
    fn rejects_a_spec_without_coordinates() {
        let result = parse_placement("spaceships/glider");
        assert_eq!(
            result,
            Err(ParseError::InvalidPlacementFormat(
                "spaceships/glider".to_string()
            ))
        );
    }

    #[test]
    fn rejects_a_spec_without_a_category_separator() {
        let result = parse_placement("glider@1,1");
        assert_eq!(
            result,
            Err(ParseError::InvalidPlacementFormat("glider@1,1".to_string()))
        );
    }

    #[test]
    fn rejects_an_empty_category() {
        let result = parse_placement("/glider@1,1");
        assert_eq!(
            result,
            Err(ParseError::EmptyComponent {
                component: "category",
                spec: "/glider@1,1".to_string()
            })
        );
    }

    #[test]
    fn rejects_a_non_numeric_coordinate() {
        let result = parse_placement("spaceships/glider@one,2");
        assert_eq!(
            result,
            Err(ParseError::InvalidCoordinate {
                spec: "spaceships/glider@one,2".to_string(),
                value: "one".to_string()
            })
        );
    }
}
