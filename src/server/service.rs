use super::request::parse_request;
use super::response::write_handler_response;
use crate::dispatcher::{Dispatcher, HandlerResponse};
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::sync::Arc;

/// `may_minihttp` service that forwards every request to the dispatcher.
///
/// Cloned once per connection; clones share the same immutable dispatcher.
#[derive(Clone)]
pub struct AppService {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppService {
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let response = match parse_request(req) {
            Some(handler_request) => self.dispatcher.dispatch(&handler_request),
            None => HandlerResponse::not_found(),
        };
        write_handler_response(res, response);
        Ok(())
    }
}
