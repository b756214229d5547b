use crate::model::{GraphqlRequest, QueryVariables};

pub const FETCH_TRANSACTIONS_QUERY: &str = r#"query FetchTransactions($values: [String!]!) {
  transactions(tags: [{ name: "ars:tags", values: $values }]) {
    edges {
      node {
        id
        tags {
          name
          value
        }
      }
    }
  }
}"#;

pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Drops every whitespace character, including interior ones.
pub fn normalize_search_term(raw: &str) -> String {
    raw.chars().filter(|ch| !ch.is_whitespace()).collect()
}

pub fn build_request(raw: &str) -> Option<GraphqlRequest> {
    if is_blank(raw) {
        return None;
    }

    Some(GraphqlRequest {
        query: FETCH_TRANSACTIONS_QUERY,
        variables: QueryVariables {
            values: vec![normalize_search_term(raw)],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SEARCH_TAG;

    #[test]
    fn normalize_search_term_strips_all_whitespace() {
        assert_eq!(normalize_search_term("  github  "), "github");
        assert_eq!(normalize_search_term("web 3\tdapp\n"), "web3dapp");
        assert_eq!(normalize_search_term("ao"), "ao");
        assert_eq!(normalize_search_term("\u{a0}arweave\u{2003}"), "arweave");
    }

    #[test]
    fn is_blank_detects_empty_and_whitespace_only_input() {
        assert!(is_blank(""));
        assert!(is_blank("  "));
        assert!(is_blank("\t\n "));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn build_request_wraps_term_in_single_value_list() {
        let request = build_request(" decentral ised ").expect("non-blank query builds");
        assert_eq!(request.variables.values, vec!["decentralised".to_string()]);
        assert_eq!(request.query, FETCH_TRANSACTIONS_QUERY);

        let body = serde_json::to_value(&request).expect("request serializes");
        assert_eq!(body["variables"]["values"][0], "decentralised");
        assert!(body["query"].as_str().unwrap_or_default().contains("FetchTransactions"));
    }

    #[test]
    fn build_request_rejects_blank_input() {
        assert!(build_request("").is_none());
        assert!(build_request("   ").is_none());
    }

    #[test]
    fn query_filters_on_search_tag() {
        let filter = format!("name: \"{SEARCH_TAG}\"");
        assert!(FETCH_TRANSACTIONS_QUERY.contains(&filter));
    }
}
