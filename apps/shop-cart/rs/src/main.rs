use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use storefront_core::{process, reduce, render, view, Action, AppState, Effect, SLIDE_INTERVAL};
use storefront_render_html::render_to_html;

// ---------------------------------------------------------------------------
// Server state
// ---------------------------------------------------------------------------

struct Server {
    app: Mutex<AppState>,
    sse_clients: Mutex<Vec<TcpStream>>,
    static_dir: String,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let port = find_arg(&args, "--port").unwrap_or_else(|| "3003".into());
    let static_dir = find_arg(&args, "--public").unwrap_or_else(|| "public".into());

    let server = Arc::new(Server {
        app: Mutex::new(AppState::new()),
        sse_clients: Mutex::new(Vec::new()),
        static_dir,
    });

    // Hero slideshow ticker — runs for the life of the process.
    {
        let server = Arc::clone(&server);
        thread::spawn(move || loop {
            thread::sleep(SLIDE_INTERVAL);
            dispatch(&server, Action::AdvanceSlide);
        });
    }

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).expect("Failed to bind");
    eprintln!("[shop-cart] http://localhost:{}", port);

    for stream in listener.incoming() {
        let stream = match stream { Ok(s) => s, Err(_) => continue };
        let server = Arc::clone(&server);
        thread::spawn(move || { let _ = handle(stream, &server); });
    }
}

fn find_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag).and_then(|i| args.get(i + 1)).cloned()
}

// ---------------------------------------------------------------------------
// Action dispatch: reduce under the lock, broadcast, schedule effects
// ---------------------------------------------------------------------------

/// Run an internal action through the same reduce/render/broadcast path as a
/// client-posted one.
fn dispatch(server: &Arc<Server>, action: Action) {
    let (snapshot, effects) = {
        let mut state = server.app.lock().unwrap();
        let effects = reduce(&mut state, action);
        (render(&state), effects)
    };
    broadcast(server, snapshot.as_bytes());
    schedule(server, effects);
}

/// Spawn a timer thread per effect. Checkout completion is never canceled;
/// a stale toast dismissal is filtered by generation inside the reducer.
fn schedule(server: &Arc<Server>, effects: Vec<Effect>) {
    for effect in effects {
        let server = Arc::clone(server);
        thread::spawn(move || match effect {
            Effect::CompleteCheckout { delay } => {
                thread::sleep(delay);
                dispatch(&server, Action::CheckoutComplete);
            }
            Effect::DismissToast { gen, delay } => {
                thread::sleep(delay);
                dispatch(&server, Action::DismissToast { gen });
            }
        });
    }
}

// ---------------------------------------------------------------------------
// HTTP handling (same pattern as the SSE dev server)
// ---------------------------------------------------------------------------

fn handle(mut stream: TcpStream, server: &Arc<Server>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let parts: Vec<&str> = request_line.trim().split_whitespace().collect();
    if parts.len() < 2 { return Ok(()); }
    let method = parts[0];
    let path = parts[1];

    let mut content_length: usize = 0;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        if line.trim().is_empty() { break; }
        if let Some((k, v)) = line.trim().split_once(':') {
            if k.trim().eq_ignore_ascii_case("content-length") {
                content_length = v.trim().parse().unwrap_or(0);
            }
        }
    }

    match (method, path) {
        ("GET", "/sse") => handle_sse(stream, server),
        ("POST", p) if p.starts_with("/actions/") => {
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body)?;
            handle_action(&mut stream, server, &body)
        }
        ("GET", "/") | ("GET", "/index.html") => serve_ssr(&mut stream, server),
        ("GET", p) => serve_static(&mut stream, &server.static_dir, p),
        ("OPTIONS", _) => {
            stream.write_all(b"HTTP/1.1 204 No Content\r\nAccess-Control-Allow-Origin: *\r\nAccess-Control-Allow-Headers: Content-Type\r\nAccess-Control-Allow-Methods: GET,POST,OPTIONS\r\n\r\n")
        }
        _ => stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n"),
    }
}

fn handle_sse(mut stream: TcpStream, server: &Arc<Server>) -> std::io::Result<()> {
    stream.write_all(b"HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nCache-Control: no-cache\r\nConnection: keep-alive\r\nAccess-Control-Allow-Origin: *\r\n\r\n")?;
    let snap = { let state = server.app.lock().unwrap(); render(&state) };
    write_sse(&mut stream, snap.as_bytes())?;
    let client = stream.try_clone()?;
    server.sse_clients.lock().unwrap().push(client);
    loop {
        thread::sleep(std::time::Duration::from_secs(30));
        if stream.write_all(b": keepalive\n\n").is_err() { break; }
    }
    Ok(())
}

fn handle_action(stream: &mut TcpStream, server: &Arc<Server>, body: &[u8]) -> std::io::Result<()> {
    let (snapshot, effects) = {
        let mut state = server.app.lock().unwrap();
        process(&mut state, body)
    };
    let snap_bytes = snapshot.as_bytes();
    let resp = format!("HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nAccess-Control-Allow-Origin: *\r\nAccess-Control-Allow-Headers: Content-Type\r\n\r\n", snap_bytes.len());
    stream.write_all(resp.as_bytes())?;
    stream.write_all(snap_bytes)?;
    broadcast(server, snap_bytes);
    schedule(server, effects);
    Ok(())
}

fn broadcast(server: &Arc<Server>, data: &[u8]) {
    let mut clients = server.sse_clients.lock().unwrap();
    let mut alive = Vec::new();
    for mut c in clients.drain(..) {
        match write_sse(&mut c, data) {
            Ok(_) => alive.push(c),
            Err(e) => eprintln!("[broadcast] write failed: {}", e),
        }
    }
    *clients = alive;
}

fn write_sse(s: &mut TcpStream, data: &[u8]) -> std::io::Result<()> {
    s.write_all(b"event: message\ndata: ")?;
    s.write_all(data)?;
    s.write_all(b"\n\n")?;
    s.flush()
}

fn serve_ssr(stream: &mut TcpStream, server: &Arc<Server>) -> std::io::Result<()> {
    let tpl = match std::fs::read_to_string(format!("{}/index.html", server.static_dir)) {
        Ok(t) => t,
        Err(_) => return stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n"),
    };
    let html = {
        let state = server.app.lock().unwrap();
        render_to_html(&view::snapshot(&state).root)
    };
    let page = tpl.replace("<!--SSR-->", &html);
    let resp = format!("HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nAccess-Control-Allow-Origin: *\r\n\r\n", page.len());
    stream.write_all(resp.as_bytes())?;
    stream.write_all(page.as_bytes())
}

fn serve_static(stream: &mut TcpStream, dir: &str, path: &str) -> std::io::Result<()> {
    let file_path = format!("{}{}", dir, path);
    let ct = if path.ends_with(".js") { "application/javascript" }
        else if path.ends_with(".css") { "text/css" }
        else if path.ends_with(".html") { "text/html; charset=utf-8" }
        else if path.ends_with(".jpg") || path.ends_with(".jpeg") { "image/jpeg" }
        else { "application/octet-stream" };
    match std::fs::read(&file_path) {
        Ok(data) => {
            let resp = format!("HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nAccess-Control-Allow-Origin: *\r\n\r\n", ct, data.len());
            stream.write_all(resp.as_bytes())?;
            stream.write_all(&data)
        }
        Err(_) => stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n"),
    }
}
