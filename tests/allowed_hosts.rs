use custom_shop::{
    config::{parse_flag, parse_list},
    middleware::hosts::AllowedHosts,
};

fn hosts(raw: &[&str]) -> AllowedHosts {
    AllowedHosts::new(raw.iter().map(|h| h.to_string()).collect())
}

#[test]
fn exact_hosts_ignore_port_and_case() {
    let allowed = hosts(&["127.0.0.1", "localhost"]);
    assert!(allowed.permits("localhost"));
    assert!(allowed.permits("LOCALHOST:3000"));
    assert!(allowed.permits("127.0.0.1:8080"));
    assert!(!allowed.permits("example.com"));
    assert!(!allowed.permits(""));
}

#[test]
fn leading_dot_matches_domain_and_subdomains() {
    let allowed = hosts(&[".shop.example"]);
    assert!(allowed.permits("shop.example"));
    assert!(allowed.permits("www.shop.example"));
    assert!(!allowed.permits("evilshop.example"));
}

#[test]
fn wildcard_accepts_any_host() {
    assert!(hosts(&["*"]).permits("anything.test:1234"));
}

#[test]
fn ipv6_literal_keeps_brackets() {
    let allowed = hosts(&["[::1]"]);
    assert!(allowed.permits("[::1]:3000"));
}

#[test]
fn env_parsing_helpers() {
    assert_eq!(
        parse_list(" a.com, ,b.com ,"),
        vec!["a.com".to_string(), "b.com".to_string()]
    );
    assert!(parse_flag("True"));
    assert!(parse_flag("1"));
    assert!(!parse_flag("no"));
    assert!(!parse_flag(""));
}
