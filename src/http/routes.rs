use crate::handlers;
use crate::http::{
    errors::send_error,
    request::{HttpMethod, HttpRequest},
    response::{HttpStatusCode, Response},
    writer::WriterError,
};

/// Signature shared by every fixture handler
pub type Handler = fn(&HttpRequest, &mut Response<'_>) -> Result<(), WriterError>;

/// Represents a single route
pub struct Route {
    methods: &'static [HttpMethod],
    path: String,
    handler: Handler,
}

/// Manages routes and dispatches requests
pub struct Router {
    routes: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Router::new()
    }
}

impl Router {
    /// Creates a router with the fixture routes registered
    pub fn new() -> Self {
        let mut router = Router { routes: Vec::new() };
        router.get("/old_page.py", handlers::old_page);
        router.get("/old_page", handlers::old_page);

        router
    }

    /// Registers a handler answering GET and HEAD
    pub fn get(&mut self, path: &str, handler: Handler) {
        self.routes.push(Route {
            methods: &[HttpMethod::Get, HttpMethod::Head],
            path: path.to_string(),
            handler,
        });
    }

    /// Finds the matching route and runs its handler, answering 404 or 405 otherwise
    pub fn route(
        &self,
        request: &HttpRequest,
        response: &mut Response<'_>,
    ) -> Result<(), WriterError> {
        let path = request.status_line.route_path();
        let mut path_matched = false;

        for route in self.routes.iter().filter(|route| route.path == path) {
            path_matched = true;
            if route.methods.contains(&request.status_line.method) {
                tracing::debug!(path = %route.path, "dispatching to fixture");
                return (route.handler)(request, response);
            }
        }

        if path_matched {
            response.headers.set("Allow", "GET, HEAD");
            send_error(
                response,
                HttpStatusCode::MethodNotAllowed,
                "Method not allowed",
            )
        } else {
            send_error(response, HttpStatusCode::NotFound, "Route not found")
        }
    }
}
