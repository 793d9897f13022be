//! Resource descriptors: path templates bound to verbs.
//!
//! A [`Resource`] owns one or more routes, each a `(verb, template)` pair.
//! Calling it picks the route by verb and by the number of path arguments
//! supplied, so a listing such as `hosts` / `app/{app}/hosts` is one
//! resource whose optional filter argument selects the template.

use crate::api::Api;
use crate::error::Error;
use crate::query::Query;
use crate::transport::Verb;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// A path such as `latency/{app}/{data_type}/series`.
///
/// Templates are values: [`bind`](Self::bind) and [`render`](Self::render)
/// return new strings and never modify the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate(Cow<'static, str>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

impl PathTemplate {
    pub const fn new(raw: &'static str) -> Self {
        Self(Cow::Borrowed(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn tokens(&self) -> Vec<Token<'_>> {
        let mut tokens = Vec::new();
        let mut rest: &str = &self.0;
        while let Some(open) = rest.find('{') {
            let Some(len) = rest[open..].find('}') else {
                break;
            };
            if open > 0 {
                tokens.push(Token::Literal(&rest[..open]));
            }
            tokens.push(Token::Placeholder(&rest[open + 1..open + len]));
            rest = &rest[open + len + 1..];
        }
        if !rest.is_empty() {
            tokens.push(Token::Literal(rest));
        }
        tokens
    }

    /// Placeholder names in declaration order.
    pub fn placeholders(&self) -> Vec<&str> {
        self.tokens()
            .into_iter()
            .filter_map(|t| match t {
                Token::Placeholder(name) => Some(name),
                Token::Literal(_) => None,
            })
            .collect()
    }

    /// Number of positional arguments [`render`](Self::render) expects.
    pub fn arity(&self) -> usize {
        self.placeholders().len()
    }

    /// Substitute one named placeholder, leaving the others in place.
    ///
    /// A `.` or `..` value is kept as is and rejected later by
    /// [`render`](Self::render).
    ///
    /// ```
    /// use traceview_lib::PathTemplate;
    ///
    /// let t = PathTemplate::new("latency/{app}/{data_type}/series").bind("data_type", "client");
    /// assert_eq!(t.as_str(), "latency/{app}/client/series");
    /// ```
    pub fn bind(&self, name: &str, value: &str) -> PathTemplate {
        let mut out = String::with_capacity(self.0.len());
        for token in self.tokens() {
            match token {
                Token::Placeholder(p) if p == name => out.push_str(&urlencoding::encode(value)),
                Token::Placeholder(p) => {
                    out.push('{');
                    out.push_str(p);
                    out.push('}');
                }
                Token::Literal(s) => out.push_str(s),
            }
        }
        PathTemplate(Cow::Owned(out))
    }

    /// Substitute every placeholder with `args`, positionally.
    ///
    /// Each argument is percent-encoded as a single path segment. A missing,
    /// extra, empty, `.` or `..` argument is a configuration error, as is a
    /// rendered path containing a dot segment.
    pub fn render(&self, args: &[&str]) -> Result<String, Error> {
        let arity = self.arity();
        if args.len() != arity {
            return Err(Error::Configuration(format!(
                "path {:?} expects {} argument(s), got {}",
                self.0,
                arity,
                args.len()
            )));
        }
        let mut out = String::with_capacity(self.0.len());
        let mut args = args.iter();
        for token in self.tokens() {
            match token {
                Token::Literal(s) => out.push_str(s),
                Token::Placeholder(name) => {
                    let value = args.next().copied().unwrap_or_default();
                    if value.is_empty() {
                        return Err(Error::Configuration(format!(
                            "path {:?} is missing a value for {{{}}}",
                            self.0, name
                        )));
                    }
                    if is_dot_segment(value) {
                        return Err(Error::Configuration(format!(
                            "{:?} is not a valid value for {{{}}} in path {:?}",
                            value, name, self.0
                        )));
                    }
                    out.push_str(&urlencoding::encode(value));
                }
            }
        }
        // Url::join collapses dot segments, which would move the request
        // to another endpoint.
        if out.split('/').any(is_dot_segment) {
            return Err(Error::Configuration(format!(
                "path {:?} resolves to a dot segment",
                out
            )));
        }
        Ok(out)
    }
}

fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}

impl From<&'static str> for PathTemplate {
    fn from(raw: &'static str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Route {
    verb: Verb,
    template: PathTemplate,
}

/// A remote resource: its routes plus the shared API context.
#[derive(Debug, Clone)]
pub struct Resource {
    api: Arc<Api>,
    routes: Vec<Route>,
}

impl Resource {
    pub fn builder(api: Arc<Api>) -> ResourceBuilder {
        ResourceBuilder {
            api,
            routes: Vec::new(),
        }
    }

    /// Single GET route, the shape of most discovery endpoints.
    pub fn get_only(api: Arc<Api>, template: impl Into<PathTemplate>) -> Self {
        Self::builder(api).get(template).build()
    }

    pub fn verbs(&self) -> Vec<Verb> {
        let mut verbs: Vec<Verb> = Vec::new();
        for route in &self.routes {
            if !verbs.contains(&route.verb) {
                verbs.push(route.verb);
            }
        }
        verbs
    }

    fn route(&self, verb: Verb, args: &[&str]) -> Result<&Route, Error> {
        if self.routes.is_empty() {
            return Err(Error::Configuration(
                "resource has no path to request".to_string(),
            ));
        }
        let candidates: Vec<&Route> = self.routes.iter().filter(|r| r.verb == verb).collect();
        let Some(&first) = candidates.first() else {
            return Err(Error::Protocol(format!(
                "{} is not supported by this resource",
                verb
            )));
        };
        // An arity mismatch falls through to the first route, whose render
        // reports the missing argument.
        Ok(candidates
            .iter()
            .find(|r| r.template.arity() == args.len())
            .copied()
            .unwrap_or(first))
    }

    /// Relative path for `verb` with `args` substituted.
    pub fn path(&self, verb: Verb, args: &[&str]) -> Result<String, Error> {
        self.route(verb, args)?.template.render(args)
    }

    /// Absolute URL for `verb` with `args` substituted.
    pub fn url(&self, verb: Verb, args: &[&str]) -> Result<Url, Error> {
        self.api.url(&self.path(verb, args)?)
    }

    pub async fn request(&self, verb: Verb, args: &[&str], params: Query) -> Result<Value, Error> {
        let path = self.path(verb, args)?;
        self.api.send(verb, &path, params).await
    }

    /// Request with a method name, e.g. from user input. Anything other than
    /// GET, POST or DELETE fails before any I/O.
    pub async fn dispatch(
        &self,
        method: &str,
        args: &[&str],
        params: Query,
    ) -> Result<Value, Error> {
        let verb: Verb = method.parse()?;
        self.request(verb, args, params).await
    }

    pub async fn get(&self, args: &[&str], params: Query) -> Result<Value, Error> {
        self.request(Verb::Get, args, params).await
    }

    pub async fn post(&self, args: &[&str], params: Query) -> Result<Value, Error> {
        self.request(Verb::Post, args, params).await
    }

    pub async fn delete(&self, args: &[&str], params: Query) -> Result<Value, Error> {
        self.request(Verb::Delete, args, params).await
    }
}

/// Collects routes for a [`Resource`].
#[derive(Debug)]
pub struct ResourceBuilder {
    api: Arc<Api>,
    routes: Vec<Route>,
}

impl ResourceBuilder {
    pub fn route(mut self, verb: Verb, template: impl Into<PathTemplate>) -> Self {
        self.routes.push(Route {
            verb,
            template: template.into(),
        });
        self
    }

    pub fn get(self, template: impl Into<PathTemplate>) -> Self {
        self.route(Verb::Get, template)
    }

    pub fn post(self, template: impl Into<PathTemplate>) -> Self {
        self.route(Verb::Post, template)
    }

    pub fn delete(self, template: impl Into<PathTemplate>) -> Self {
        self.route(Verb::Delete, template)
    }

    /// Bind `name` in every route added so far.
    pub fn bind(mut self, name: &str, value: &str) -> Self {
        for route in &mut self.routes {
            route.template = route.template.bind(name, value);
        }
        self
    }

    pub fn build(self) -> Resource {
        Resource {
            api: self.api,
            routes: self.routes,
        }
    }
}
