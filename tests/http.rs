use core::time::Duration;
use recipe_dom::{
	api::{HttpRecipeApi, RecipeApi},
	Error,
};
use std::{
	io::{Read, Write},
	net::TcpListener,
	thread,
};


/// Accepts one connection, reads the request head and answers with `response` (or never answers if it's `None`).
/// Returns the base URL and a handle yielding the request head.
fn serve_once(response: Option<&'static str>) -> (String, thread::JoinHandle<String>) {
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let base = format!("http://{}/api/v2/recipes", listener.local_addr().unwrap());
	let handle = thread::spawn(move || {
		let (mut stream, _) = listener.accept().unwrap();
		let mut head = Vec::new();
		let mut buffer = [0; 1024];
		while !head.windows(4).any(|window| window == b"\r\n\r\n") {
			let read = stream.read(&mut buffer).unwrap();
			if read == 0 {
				break;
			}
			head.extend_from_slice(&buffer[..read]);
		}
		match response {
			Some(body) => {
				let reply = format!(
					"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
					body.len(),
					body
				);
				stream.write_all(reply.as_bytes()).unwrap();
			}
			None => thread::sleep(Duration::from_secs(2)),
		}
		String::from_utf8_lossy(&head).into_owned()
	});
	(base, handle)
}

#[tokio::test]
async fn search_sends_query_and_key() {
	logging_::init();
	let (base, server) = serve_once(Some(
		r#"{"status":"success","results":1,"data":{"recipes":[{"id":"abc","title":"Pizza","publisher":"Closet Cooking","image_url":"https://example.com/p.jpg"}]}}"#,
	));
	let api = HttpRecipeApi::new(base, "k3y", Duration::from_secs(5));

	let results = api.search("pizza").await.unwrap();
	assert_eq!(results.len(), 1);
	assert_eq!(results[0].image, "https://example.com/p.jpg");
	assert_eq!(results[0].key, None);

	let head = server.join().unwrap();
	assert!(head.starts_with("GET /api/v2/recipes?search=pizza&key=k3y "), "{}", head);
}

#[tokio::test]
async fn slow_responses_time_out() {
	logging_::init();
	let (base, _server) = serve_once(None);
	let api = HttpRecipeApi::new(base, "k3y", Duration::from_millis(200));

	let error = api.fetch_recipe("abc").await.unwrap_err();
	assert!(matches!(error, Error::Timeout(timeout) if timeout == Duration::from_millis(200)));
	assert_eq!(error.to_string(), "Request took too long! Timeout after 0.2 second(s)");
}
