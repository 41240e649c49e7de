//! Request model: the method enum, the `Request` capability, and a plain
//! owned implementation for the common case.

/// HTTP method a request can be dispatched with. The client performs a
/// two-way dispatch: GET sends parameters as query parameters, POST sends
/// them as a form-encoded body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Description of a single HTTP call against the web application.
///
/// A request is consumed by one `Client::send` and then discarded; nothing
/// in this layer holds on to it. Application code can implement the trait
/// on its own request types or use [`SimpleRequest`].
pub trait Request {
    /// Resource-relative path, the part of the URL after
    /// `scheme://host[:port]`. It does not need to start with `/`; a single
    /// leading slash is stripped during resolution.
    fn path(&self) -> &str;

    /// Method to dispatch the request with.
    fn method(&self) -> Method;

    /// Key/value parameters for the request. Empty by default.
    fn parameters(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Owned `Request` implementation with chainable parameter building.
#[derive(Debug, Clone)]
pub struct SimpleRequest {
    path: String,
    method: Method,
    parameters: Vec<(String, String)>,
}

impl SimpleRequest {
    /// A GET request for `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::Get,
            parameters: Vec::new(),
        }
    }

    /// A POST request for `path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::Post,
            parameters: Vec::new(),
        }
    }

    /// Append one parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((key.into(), value.into()));
        self
    }
}

impl Request for SimpleRequest {
    fn path(&self) -> &str {
        &self.path
    }

    fn method(&self) -> Method {
        self.method
    }

    fn parameters(&self) -> Vec<(String, String)> {
        self.parameters.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BareRequest;

    impl Request for BareRequest {
        fn path(&self) -> &str {
            "v1/ping"
        }

        fn method(&self) -> Method {
            Method::Get
        }
    }

    #[test]
    fn parameters_default_to_empty() {
        assert!(BareRequest.parameters().is_empty());
    }

    #[test]
    fn simple_request_accumulates_params_in_order() {
        let request = SimpleRequest::post("v1/login")
            .param("user", "ada")
            .param("token", "7");
        assert_eq!(request.path(), "v1/login");
        assert_eq!(request.method(), Method::Post);
        assert_eq!(
            request.parameters(),
            vec![
                ("user".to_string(), "ada".to_string()),
                ("token".to_string(), "7".to_string()),
            ]
        );
    }
}
