//! Query fan-out builder
//!
//! One keyword becomes one contains-query per searchable field. The queries
//! never combine fields: OR-across-fields is achieved structurally, by
//! issuing independent per-field queries and merging at the result layer,
//! so the backend never has to evaluate a cross-field query tree.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::schema::FieldDescriptor;

/// Page size applied when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Optional sort, applied identically to every per-field query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    /// Parse `field:asc` / `field:desc`; a bare `field` sorts ascending.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        match raw.split_once(':') {
            None => Some(Self {
                field: raw.to_string(),
                order: SortOrder::Asc,
            }),
            Some((field, order)) => {
                if field.is_empty() {
                    return None;
                }
                let order = match order {
                    "asc" => SortOrder::Asc,
                    "desc" => SortOrder::Desc,
                    _ => return None,
                };
                Some(Self {
                    field: field.to_string(),
                    order,
                })
            }
        }
    }
}

/// Page descriptor passed through to the backend unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u64,
    pub sort: Option<SortSpec>,
}

impl PageRequest {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit,
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One contains-query bound to exactly one field.
///
/// Built fresh per search call; the keyword and page vary between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldQuery {
    pub field: FieldDescriptor,
    pub keyword: String,
    pub page: PageRequest,
}

impl FieldQuery {
    /// Render the backend search body for this query.
    ///
    /// Contains semantics via a wildcard-wrapped `query_string` restricted to
    /// the one field. `lenient` keeps non-text fields from failing the batch.
    pub fn to_body(&self) -> Value {
        let mut body = json!({
            "query": {
                "query_string": {
                    "query": format!("*{}*", escape_keyword(&self.keyword)),
                    "fields": [self.field.as_str()],
                    "lenient": true,
                }
            },
            "from": self.page.offset,
            "size": self.page.limit,
        });

        if let Some(ref sort) = self.page.sort {
            let mut clause = serde_json::Map::new();
            clause.insert(sort.field.clone(), json!({ "order": sort.order.as_str() }));
            body["sort"] = Value::Array(vec![Value::Object(clause)]);
        }

        body
    }
}

/// Build one query per field, in field order, identical page on each.
pub fn build_queries(
    keyword: &str,
    page: &PageRequest,
    fields: &[FieldDescriptor],
) -> Vec<FieldQuery> {
    fields
        .iter()
        .map(|field| FieldQuery {
            field: field.clone(),
            keyword: keyword.to_string(),
            page: page.clone(),
        })
        .collect()
}

/// Escape `query_string` special characters so the keyword is matched
/// literally inside the wildcard wrapper.
fn escape_keyword(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(
            c,
            '+' | '-'
                | '='
                | '>'
                | '<'
                | '!'
                | '('
                | ')'
                | '{'
                | '}'
                | '['
                | ']'
                | '^'
                | '"'
                | '~'
                | '*'
                | '?'
                | ':'
                | '\\'
                | '/'
                | '&'
                | '|'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_query_per_field_in_order() {
        let fields = vec![
            FieldDescriptor::new("name"),
            FieldDescriptor::new("path"),
            FieldDescriptor::new("meta.tag"),
        ];
        let page = PageRequest::new(0, 10);
        let queries = build_queries("report", &page, &fields);

        assert_eq!(queries.len(), fields.len());
        for (query, field) in queries.iter().zip(&fields) {
            assert_eq!(&query.field, field);
            assert_eq!(query.keyword, "report");
            assert_eq!(query.page, page);
        }
    }

    #[test]
    fn empty_keyword_still_fans_out() {
        let fields = vec![FieldDescriptor::new("name"), FieldDescriptor::new("path")];
        let queries = build_queries("", &PageRequest::default(), &fields);
        assert_eq!(queries.len(), 2);
    }

    #[test]
    fn body_carries_contains_predicate_and_page() {
        let query = FieldQuery {
            field: FieldDescriptor::new("name"),
            keyword: "foo".to_string(),
            page: PageRequest::new(20, 10),
        };
        let body = query.to_body();

        assert_eq!(body["query"]["query_string"]["query"], "*foo*");
        assert_eq!(body["query"]["query_string"]["fields"][0], "name");
        assert_eq!(body["from"], 20);
        assert_eq!(body["size"], 10);
        assert!(body.get("sort").is_none());
    }

    #[test]
    fn sort_is_rendered_when_present() {
        let page = PageRequest::new(0, 10).with_sort(SortSpec {
            field: "name".to_string(),
            order: SortOrder::Desc,
        });
        let query = FieldQuery {
            field: FieldDescriptor::new("name"),
            keyword: "foo".to_string(),
            page,
        };
        let body = query.to_body();

        assert_eq!(body["sort"][0]["name"]["order"], "desc");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let query = FieldQuery {
            field: FieldDescriptor::new("name"),
            keyword: "a*b?c".to_string(),
            page: PageRequest::default(),
        };
        let body = query.to_body();

        assert_eq!(body["query"]["query_string"]["query"], "*a\\*b\\?c*");
    }

    #[test]
    fn sort_spec_parsing() {
        assert_eq!(
            SortSpec::parse("name:asc"),
            Some(SortSpec {
                field: "name".to_string(),
                order: SortOrder::Asc
            })
        );
        assert_eq!(
            SortSpec::parse("name:desc"),
            Some(SortSpec {
                field: "name".to_string(),
                order: SortOrder::Desc
            })
        );
        assert_eq!(
            SortSpec::parse("name"),
            Some(SortSpec {
                field: "name".to_string(),
                order: SortOrder::Asc
            })
        );
        assert_eq!(SortSpec::parse(""), None);
        assert_eq!(SortSpec::parse("name:sideways"), None);
    }
}
