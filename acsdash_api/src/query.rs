//! Query construction for the ACS data endpoint.
//!
//! Every request has the same shape:
//! `{base}?get={vars},NAME&for={selector}&in={selector}&key={key}`.

use url::Url;

use crate::variables;

/// Geographic selector, rendered into the `for=` and `in=` parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Geography {
    /// One place within a state: `for=place:{place}&in=state:{state}`.
    Place { state: String, place: String },
    /// Every place within one state, or nationwide when `state` is `None`
    /// (`for=place:*&in=state:{code or *}`).
    AllPlaces { state: Option<String> },
    /// One ZIP code tabulation area.
    Zcta { zip: String },
    /// One whole state.
    State { state: String },
}

/// Builder for one ACS request.
///
/// `NAME` is appended to the variable list automatically; every response
/// carries the human-readable unit name.
#[derive(Clone, Debug)]
pub struct AcsQuery {
    variables: Vec<String>,
    geography: Geography,
    api_key: Option<String>,
}

impl AcsQuery {
    pub fn new(geography: Geography) -> Self {
        Self {
            variables: Vec::new(),
            geography,
            api_key: None,
        }
    }

    pub fn with_variable(mut self, code: &str) -> Self {
        self.variables.push(code.to_string());
        self
    }

    pub fn with_variables(mut self, codes: &[&str]) -> Self {
        self.variables.extend(codes.iter().map(|c| c.to_string()));
        self
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    /// Appends this query's parameters to the given URL, returning the
    /// modified URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("get", &self.get_clause());

        match &self.geography {
            Geography::Place { state, place } => {
                url.query_pairs_mut()
                    .append_pair("for", &format!("place:{}", place))
                    .append_pair("in", &format!("state:{}", state));
            }
            Geography::AllPlaces { state } => {
                url.query_pairs_mut()
                    .append_pair("for", "place:*")
                    .append_pair(
                        "in",
                        &format!("state:{}", state.as_deref().unwrap_or("*")),
                    );
            }
            Geography::Zcta { zip } => {
                url.query_pairs_mut()
                    .append_pair("for", &format!("zip code tabulation area:{}", zip));
            }
            Geography::State { state } => {
                url.query_pairs_mut()
                    .append_pair("for", &format!("state:{}", state));
            }
        }

        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }

        url
    }

    /// Stable identity for caching: the full query minus the API key.
    pub fn cache_key(&self) -> String {
        format!("{}|{:?}", self.get_clause(), self.geography)
    }

    fn get_clause(&self) -> String {
        let mut vars = self.variables.join(",");
        if vars.is_empty() {
            variables::NAME.to_string()
        } else {
            vars.push(',');
            vars.push_str(variables::NAME);
            vars
        }
    }
}
