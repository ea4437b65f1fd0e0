mod common;

use common::fixtures::SHOP;
use common::{TestResult, texts};
use serde_json::json;
use sieve::{
    ConditionalRule, Context, ContextOptions, HostNode, PropertyAssignment, XmlDocument,
};

#[test]
fn test_found_nodes_can_be_queried_again() -> TestResult {
    let doc = XmlDocument::parse(SHOP)?;
    let ctx = Context::new();
    let session = ctx.session(doc.root());

    let chair = session
        .query(r#"article advanced-selector-contains("chair")"#)?
        .expect("chair article");
    let price = chair.query("span.price")?.expect("price inside chair");
    assert_eq!(price.text_content(), "Total: 95 EUR");

    // Queries from a found node stay inside it.
    let headings = chair.query_all("h2")?;
    assert_eq!(texts(&headings), vec!["Chair"]);
    assert!(chair.query("img")?.is_none());
    Ok(())
}

#[test]
fn test_pseudo_only_selector_tests_the_found_node_itself() -> TestResult {
    let doc = XmlDocument::parse(SHOP)?;
    let ctx = Context::new();
    let session = ctx.session(doc.root());

    let lamp = session.query("article")?.expect("first article");
    let itself = lamp.query(r#"advanced-selector-self("[data-sku=p1]")"#)?;
    assert_eq!(itself.as_ref(), Some(&lamp));
    assert!(lamp.query(r#"advanced-selector-self("[data-sku=p2]")"#)?.is_none());
    Ok(())
}

#[test]
fn test_provenance_is_recorded_when_enabled() -> TestResult {
    let doc = XmlDocument::parse(SHOP)?;
    let ctx = Context::with_options(ContextOptions {
        record_provenance: true,
    });
    let session = ctx.session(doc.root());

    let found = session.query_all(["a.y", "a.x"])?;
    let selectors: Vec<_> = found.iter().map(|f| f.selector()).collect();
    assert_eq!(
        selectors,
        vec![
            Some("a.y".to_string()),
            Some("a.y".to_string()),
            Some("a.x".to_string()),
        ]
    );
    assert_eq!(texts(&found), vec!["say HELLO now", "goodbye", "Home"]);

    // The last wrap of a node wins.
    let sale = session.query("a.x.y")?.expect("sale link");
    assert_eq!(sale.selector().as_deref(), Some("a.x.y"));
    assert_eq!(found[0].selector().as_deref(), Some("a.x.y"));
    Ok(())
}

#[test]
fn test_provenance_is_off_by_default() -> TestResult {
    let doc = XmlDocument::parse(SHOP)?;
    let ctx = Context::new();
    let found = ctx.session(doc.root()).query("a")?.expect("an anchor");
    assert_eq!(found.selector(), None);
    Ok(())
}

#[test]
fn test_closest_joins_alternatives() -> TestResult {
    let doc = XmlDocument::parse(SHOP)?;
    let ctx = Context::with_options(ContextOptions {
        record_provenance: true,
    });
    let session = ctx.session(doc.root());

    let price = session.query("span.price")?.expect("a price");
    let container = price.closest(["table", "section"])?.expect("section");
    assert_eq!(container.attribute("id"), Some("products"));
    assert_eq!(container.selector().as_deref(), Some("table, section"));

    let article = price.closest(["article", "section"])?.expect("article");
    assert_eq!(article.tag_name(), "article");

    assert!(price.closest("nav")?.is_none());
    Ok(())
}

#[test]
fn test_session_as_fn() -> TestResult {
    let doc = XmlDocument::parse(SHOP)?;
    let ctx = Context::new();
    let session = ctx.session(doc.root());
    let q = session.as_fn();

    let via_fn = q(r#"li advanced-selector-contains("sky")"#)?;
    let via_query = session.query(r#"li advanced-selector-contains("sky")"#)?;
    assert_eq!(via_fn, via_query);
    assert!(via_fn.is_some());
    Ok(())
}

#[test]
fn test_apply_conditional_outside_the_selector_language() -> TestResult {
    let doc = XmlDocument::parse(SHOP)?;
    let ctx = Context::new();
    let session = ctx.session(doc.root());

    let rule = ConditionalRule {
        selector: r#"span advanced-selector-contains("95")"#.to_string(),
        when_match: Some(PropertyAssignment {
            property: "expensive".to_string(),
            value: json!(true),
        }),
        when_no_match: Some(PropertyAssignment {
            property: "expensive".to_string(),
            value: json!(false),
        }),
    };

    let articles = session.query_all("article")?;
    assert!(!articles[0].apply_conditional(&rule)?);
    assert!(articles[1].apply_conditional(&rule)?);
    assert_eq!(articles[0].property("expensive"), Some(json!(false)));
    assert_eq!(articles[1].property("expensive"), Some(json!(true)));

    // The rule can also be loaded from the JSON form used by smuggleIf.
    let from_json = ConditionalRule::from_json(
        r#"{"selector": "img", "whenMatch": {"property": "pictured", "value": "yes"}}"#,
    )?;
    assert!(session.apply_conditional(&from_json)?);
    assert_eq!(doc.root().property("pictured"), Some(json!("yes")));
    Ok(())
}

#[test]
fn test_found_derefs_to_the_node() -> TestResult {
    let doc = XmlDocument::parse(SHOP)?;
    let ctx = Context::new();
    let found = ctx.session(doc.root()).query("ul")?.expect("basket");

    assert_eq!(found.attribute("id"), Some("basket"));
    assert!(found.matches("#basket")?);
    let node = found.clone().into_node();
    assert_eq!(&node, found.node());
    Ok(())
}
