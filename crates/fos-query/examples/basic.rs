//! Example: load a fragment, query it and rewrite it

use fos_query::{LoadOptions, NodeSet};
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"<nav class="menu">
<a href="index.html">Home</a>
<a href="docs/" class="active">Docs</a>
<img src="logo.png">
</nav>"#;

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG=fos_query=trace for the full story)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = LoadOptions::new().with_base_url("https://example.com/site/");
    let nav = NodeSet::from_html_with(PAGE, &options)?;

    for link in &nav.find("a")? {
        println!("{} -> {}", link.inner_html(), link.attribute("href").unwrap_or_default());
    }

    nav.find("a.active")?
        .remove_class("active")
        .set_style("font-weight", "bold");
    nav.append("<a href=\"about.html\">About</a>")?;
    nav.find("img")?.replace("<span class=\"logo\">fOS</span>")?;

    println!("{}", nav);
    Ok(())
}
