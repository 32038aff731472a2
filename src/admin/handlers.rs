use std::collections::BTreeMap;

use axum::{
    extract::{Query as Params, State},
    Json,
};
use serde::Serialize;

use crate::admin::AdminState;
use crate::annotations::predicate::parse_value;
use crate::annotations::{AnnotationMap, Criterion, Query, RouteMatches};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub routes: usize,
    pub annotated_paths: usize,
}

pub async fn get_status(State(state): State<AdminState>) -> Json<SystemStatus> {
    let index = state.index.load();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        routes: index.host().len(),
        annotated_paths: index.annotations().len(),
    })
}

pub async fn get_annotations(
    State(state): State<AdminState>,
) -> Json<BTreeMap<String, AnnotationMap>> {
    let index = state.index.load();
    let annotations = index
        .annotations()
        .iter()
        .map(|(path, map)| (path.to_string(), map.clone()))
        .collect();
    Json(annotations)
}

/// `GET /admin/routes?has=index&label=Blog`
pub async fn get_routes(
    State(state): State<AdminState>,
    Params(params): Params<Vec<(String, String)>>,
) -> Json<RouteMatches> {
    let query = query_from_params(&params);
    let index = state.index.load();
    Json(index.find_all(query))
}

/// `has=NAME` adds a presence check; any other pair adds an equality check.
pub fn query_from_params(params: &[(String, String)]) -> Query {
    params
        .iter()
        .map(|(key, value)| {
            if key == "has" {
                Criterion::has(value.as_str())
            } else {
                Criterion::equals(key.as_str(), parse_value(value))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_from_params() {
        let params = vec![
            ("has".to_string(), "index".to_string()),
            ("label".to_string(), "Blog".to_string()),
            ("order".to_string(), "2".to_string()),
        ];
        let Query::All(criteria) = query_from_params(&params) else {
            panic!("expected criteria query");
        };
        assert_eq!(
            criteria,
            vec![
                Criterion::has("index"),
                Criterion::equals("label", "Blog"),
                Criterion::equals("order", json!(2)),
            ]
        );
    }
}
