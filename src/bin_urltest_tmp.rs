fn main() {
    for s in ["http://", "https:///path-only", "http://example.com"] {
        match url::Url::parse(s) {
            Ok(u) => println!("{s:?} => Ok host_str={:?} host={:?}", u.host_str(), u.host()),
            Err(e) => println!("{s:?} => Err {e}"),
        }
    }
}
