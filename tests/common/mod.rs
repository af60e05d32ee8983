#![allow(dead_code)]

pub mod handlers {
    use product_service::{HandlerRequest, HandlerResponse, PathParams};
    use std::sync::{Arc, Mutex};

    /// One recorded handler invocation: (handler tag, extracted params)
    pub type Call = (&'static str, Vec<(String, String)>);

    /// Shared log of which handler ran with which parameters
    #[derive(Clone, Default)]
    pub struct CallLog(Arc<Mutex<Vec<Call>>>);

    impl CallLog {
        /// Handler that records `tag` and answers 200 with the tag as body
        pub fn handler(
            &self,
            tag: &'static str,
        ) -> impl Fn(&HandlerRequest, &PathParams) -> HandlerResponse + Send + Sync + 'static
        {
            let log = self.clone();
            move |_req, params| {
                let pairs = params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                log.0.lock().unwrap().push((tag, pairs));
                let mut res = HandlerResponse::status(200);
                res.body = tag.as_bytes().to_vec();
                res
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.0.lock().unwrap().clone()
        }
    }
}

pub mod http {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    pub fn send_request(addr: &SocketAddr, req: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_millis(200)))
            .unwrap();
        let mut buf = Vec::new();
        loop {
            let mut tmp = [0u8; 1024];
            match stream.read(&mut tmp) {
                Ok(0) => break,
                Ok(n) => buf.extend_from_slice(&tmp[..n]),
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break
                }
                Err(e) => panic!("read error: {:?}", e),
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Split a raw HTTP/1.1 response into (status, header block, body)
    pub fn parse_response(resp: &str) -> (u16, String, String) {
        let (head, body) = resp.split_once("\r\n\r\n").unwrap_or((resp, ""));
        let status = head
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().nth(1))
            .and_then(|code| code.parse().ok())
            .unwrap_or(0);
        (status, head.to_string(), body.to_string())
    }
}

pub mod test_server {
    use product_service::app::build_dispatcher;
    use product_service::products::InMemoryRepository;
    use product_service::server::{AppService, HttpServer, ServerHandle};
    use std::net::{SocketAddr, TcpListener};
    use std::sync::{Arc, Once};

    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// Product service on a free local port; stopped on drop
    pub struct TestServer {
        handle: Option<ServerHandle>,
        pub addr: SocketAddr,
    }

    impl TestServer {
        pub fn start(repository: InMemoryRepository) -> Self {
            setup_may_runtime();
            let dispatcher = build_dispatcher(repository).unwrap();
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);
            let handle = HttpServer(AppService::new(Arc::new(dispatcher)))
                .start(addr)
                .unwrap();
            handle.wait_ready().unwrap();
            Self {
                handle: Some(handle),
                addr,
            }
        }
    }

    impl Drop for TestServer {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.stop();
            }
        }
    }
}
