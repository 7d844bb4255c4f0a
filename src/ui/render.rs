//! Pure HTML rendering for the catalog UI
//!
//! Every function takes explicit state and returns markup. Descriptor text is
//! always escaped.

use crate::catalog::{Catalog, CatalogState, CategoryFilter, Match, ALL_CATEGORIES};
use crate::types::Descriptor;

use super::execute::TryItPanel;
use super::theme::ThemePreference;
use super::widgets::ToastQueue;

/// Hidden field carrying the category through the execute form
pub const STATE_CATEGORY_FIELD: &str = "__category";
/// Hidden field carrying the search query through the execute form
pub const STATE_QUERY_FIELD: &str = "__q";

const BRAND_FALLBACK: &str = "Elle UI";
const HERO_FALLBACK: &str = "Elle API Hub";
const VERSION_FALLBACK: &str = "v1.0.0";
const SUBTITLE_FALLBACK: &str = "Modern API Documentation";
const STATUS_FALLBACK: &str = "🟢 Online";
const FOOTER_CREATOR_FALLBACK: &str = "Elle UI Team";

const ALL_LABEL: &str = "All Categories";
const ALL_ICON: &str = "fas fa-th-large";
const ALL_COLOR: &str = "#6366f1";

/// Clipboard copy for the modal's URL and response, and the loading state
/// while the execute form is in flight
const MODAL_SCRIPT: &str = r##"<script>
(function () {
  var container = document.getElementById("toastContainer");
  function toast(kind, message) {
    var ttl = Number(container.dataset.ttl) || 3000;
    var el = document.createElement("div");
    el.className = "toast toast-" + kind;
    el.setAttribute("role", "status");
    el.style.setProperty("--toast-ttl", ttl + "ms");
    var icon = kind === "success" ? "fas fa-check" : "fas fa-exclamation-circle";
    el.innerHTML = '<div class="toast-icon"><i class="' + icon + '"></i></div><div class="toast-content"><div class="toast-message"></div></div>';
    el.querySelector(".toast-message").textContent = message;
    container.appendChild(el);
    setTimeout(function () { el.remove(); }, ttl + 300);
  }
  document.querySelectorAll("[data-copy-target]").forEach(function (button) {
    button.addEventListener("click", function () {
      var source = document.getElementById(button.dataset.copyTarget);
      var text = source ? source.textContent : "";
      if (!text) {
        toast("error", "Nothing to copy");
        return;
      }
      if (!navigator.clipboard) {
        toast("error", "Failed to copy to clipboard");
        return;
      }
      navigator.clipboard.writeText(text).then(
        function () { toast("success", "Copied to clipboard"); },
        function () { toast("error", "Failed to copy to clipboard"); }
      );
    });
  });
  var form = document.getElementById("parametersForm");
  if (form) {
    form.addEventListener("submit", function () {
      document.getElementById("loadingResponse").style.display = "flex";
      document.getElementById("tryEndpoint").disabled = true;
    });
  }
})();
</script>
"##;

/// Everything one page render needs
pub struct PageView<'a> {
    /// None when the descriptor failed to load
    pub catalog: Option<&'a Catalog>,
    pub state: &'a CatalogState,
    pub theme: ThemePreference,
    /// Scheme and authority shown in endpoint URLs
    pub origin: &'a str,
    pub panel: Option<&'a TryItPanel<'a>>,
    pub toasts: &'a ToastQueue,
    pub year: i32,
}

/// Escape text for HTML element content and attribute values
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn text_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback)
}

fn hidden(name: &str, value: &str) -> String {
    format!(
        r#"<input type="hidden" name="{}" value="{}">"#,
        escape(name),
        escape(value)
    )
}

/// Hidden inputs preserving the filter state across GET forms
fn state_fields(state: &CatalogState) -> String {
    let mut html = hidden("category", state.category.key());
    if !state.query.is_empty() {
        html.push_str(&hidden("q", &state.query));
    }
    html
}

/// Full page
pub fn render_page(view: &PageView<'_>) -> String {
    let descriptor = view.catalog.map(Catalog::descriptor);
    let brand = text_or(descriptor.and_then(|d| d.name.as_deref()), BRAND_FALLBACK);

    let mut body_class = view.theme.body_class().to_string();
    if view.panel.is_some() {
        body_class.push_str(" modal-open");
    }

    let mut html = String::with_capacity(16 * 1024);
    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="color-scheme" content="light dark">
<title>{title}</title>
<link rel="stylesheet" href="/assets/style.css">
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
</head>
<body class="{body_class}">
"#,
        title = escape(brand),
        body_class = body_class,
    ));

    html.push_str(&render_navbar(descriptor, view.theme));
    html.push_str("<main class=\"container\">\n");
    html.push_str(&render_hero(view.catalog));

    if let Some(catalog) = view.catalog {
        html.push_str(&render_search(view.state));
        html.push_str(&render_categories(catalog, view.state));
        html.push_str(&render_endpoints(&catalog.filter(view.state), view.state, view.origin));
    }
    html.push_str("</main>\n");

    if let Some(panel) = view.panel {
        html.push_str(&render_modal(panel, view.state, view.origin));
    }

    html.push_str(&render_footer(descriptor, view.year));
    html.push_str(&render_toasts(view.toasts));
    if view.panel.is_some() {
        html.push_str(MODAL_SCRIPT);
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn render_navbar(descriptor: Option<&Descriptor>, theme: ThemePreference) -> String {
    let name = text_or(descriptor.and_then(|d| d.name.as_deref()), BRAND_FALLBACK);
    let version = text_or(descriptor.and_then(|d| d.version.as_deref()), VERSION_FALLBACK);
    let status = text_or(
        descriptor.and_then(|d| d.header.status.as_deref()),
        STATUS_FALLBACK,
    );
    let icon = match theme {
        ThemePreference::Dark => "fas fa-moon",
        ThemePreference::Light => "fas fa-sun",
        ThemePreference::System => "fas fa-circle-half-stroke",
    };

    format!(
        r#"<header class="navbar">
  <div class="brand"><span class="brand-name">{name}</span><span class="brand-version">{version}</span></div>
  <span class="api-status">{status}</span>
  <form method="post" action="/theme/toggle" class="theme-form">
    <button type="submit" class="theme-toggle" aria-label="Toggle theme"><i class="{icon}"></i></button>
  </form>
</header>
"#,
        name = escape(name),
        version = escape(version),
        status = escape(status),
        icon = icon,
    )
}

fn render_hero(catalog: Option<&Catalog>) -> String {
    let descriptor = catalog.map(Catalog::descriptor);
    let title = text_or(descriptor.and_then(|d| d.name.as_deref()), HERO_FALLBACK);
    let subtitle = text_or(
        descriptor.and_then(|d| d.description.as_deref()),
        SUBTITLE_FALLBACK,
    );
    let endpoints = catalog.map_or(0, Catalog::len);
    let categories = catalog.map_or(0, Catalog::category_count);

    format!(
        r#"<section class="hero">
  <h1 class="hero-title">{title}</h1>
  <p class="hero-subtitle">{subtitle}</p>
  <div class="hero-stats">
    <div class="stat"><span class="stat-value" id="totalEndpoints" data-target="{endpoints}">{endpoints}</span><span class="stat-label">Endpoints</span></div>
    <div class="stat"><span class="stat-value" id="totalCategories" data-target="{categories}">{categories}</span><span class="stat-label">Categories</span></div>
  </div>
</section>
"#,
        title = escape(title),
        subtitle = escape(subtitle),
    )
}

/// Search box and clear control. Clearing keeps the category.
pub fn render_search(state: &CatalogState) -> String {
    let clear_class = if state.query.is_empty() {
        "search-clear"
    } else {
        "search-clear visible"
    };

    format!(
        r#"<section class="search">
  <form method="get" action="/" class="search-form">
    {category}
    <i class="fas fa-search"></i>
    <input type="search" name="q" id="searchInput" value="{query}" placeholder="Search endpoints..." autocomplete="off">
    <button type="submit" class="search-submit">Search</button>
  </form>
  <form method="get" action="/" class="search-clear-form">
    {category}
    <button type="submit" class="{clear_class}" aria-label="Clear search"><i class="fas fa-times"></i></button>
  </form>
</section>
"#,
        category = hidden("category", state.category.key()),
        query = escape(&state.query),
        clear_class = clear_class,
    )
}

/// Category tabs, "All Categories" first, with item counts
pub fn render_categories(catalog: &Catalog, state: &CatalogState) -> String {
    let mut tabs = vec![category_tab(
        ALL_CATEGORIES,
        ALL_LABEL,
        ALL_ICON,
        ALL_COLOR,
        catalog.len(),
        state.category == CategoryFilter::All,
    )];

    for category in &catalog.descriptor().categories {
        let active = matches!(&state.category, CategoryFilter::Named(name) if *name == category.name);
        tabs.push(category_tab(
            &category.name,
            &category.name,
            &category.icon,
            &category.color,
            category.items.len(),
            active,
        ));
    }

    let query = if state.query.is_empty() {
        String::new()
    } else {
        hidden("q", &state.query)
    };

    format!(
        "<section class=\"categories\">\n  <form method=\"get\" action=\"/\" class=\"category-slider\" id=\"categorySlider\">\n    {}\n{}  </form>\n</section>\n",
        query,
        tabs.concat()
    )
}

fn category_tab(key: &str, label: &str, icon: &str, color: &str, count: usize, active: bool) -> String {
    format!(
        r#"    <button type="submit" name="category" value="{key}" class="category-item{active}" style="--category-color: {color}">
      <span class="category-icon" style="background: {color}"><i class="{icon}"></i></span>
      <span class="category-info"><span class="category-name">{label}</span><span class="category-count">{count} endpoints</span></span>
    </button>
"#,
        key = escape(key),
        active = if active { " active" } else { "" },
        color = escape(color),
        icon = escape(icon),
        label = escape(label),
        count = count,
    )
}

/// Endpoint cards, or the no-results block when nothing matches
pub fn render_endpoints(matches: &[Match<'_>], state: &CatalogState, origin: &str) -> String {
    if matches.is_empty() {
        return r#"<section class="no-results" id="noResults">
  <i class="fas fa-search"></i>
  <h3>No endpoints found</h3>
  <p>Try a different search term or category.</p>
</section>
"#
        .to_string();
    }

    let fields = state_fields(state);
    let cards: String = matches
        .iter()
        .map(|m| endpoint_card(m, &fields, origin))
        .collect();

    format!("<section class=\"endpoints-grid\" id=\"endpointsGrid\">\n{cards}</section>\n")
}

fn endpoint_card(m: &Match<'_>, state_fields: &str, origin: &str) -> String {
    let item = &m.record.item;
    let method = item.method();
    let status = if item.is_ready() {
        "✓ Ready".to_string()
    } else {
        escape(&item.status)
    };

    format!(
        r#"  <form method="get" action="/endpoint/{index}" class="endpoint-card-form">
    {state_fields}
    <button type="submit" class="endpoint-card">
      <span class="endpoint-header"><span class="endpoint-method method-{method_class}">{method}</span><span class="endpoint-status">{status}</span></span>
      <span class="endpoint-title">{name}</span>
      <span class="endpoint-description">{desc}</span>
      <span class="endpoint-url"><code>{origin}{path}</code></span>
    </button>
  </form>
"#,
        index = m.index,
        state_fields = state_fields,
        method_class = escape(&method.to_lowercase()),
        method = escape(method),
        status = status,
        name = escape(&item.name),
        desc = escape(&item.desc),
        origin = escape(origin),
        path = escape(item.display_path()),
    )
}

/// Try-it modal for one endpoint in any phase
pub fn render_modal(panel: &TryItPanel<'_>, state: &CatalogState, origin: &str) -> String {
    let item = &panel.record.item;
    let method = item.method();

    let params = if item.params.is_empty() {
        String::new()
    } else {
        let groups: String = item
            .params
            .iter()
            .map(|param| {
                let invalid = if panel.is_invalid(&param.name) { " invalid" } else { "" };
                format!(
                    r#"      <div class="parameter-group">
        <label class="parameter-label" for="param-{name}">{name} *</label>
        <input type="text" class="parameter-input{invalid}" id="param-{name}" name="{name}" value="{value}" placeholder="Enter {name}...">
        <div class="parameter-description">{description}</div>
      </div>
"#,
                    name = escape(&param.name),
                    invalid = invalid,
                    value = escape(panel.value(&param.name)),
                    description = escape(&param.description),
                )
            })
            .collect();
        format!(
            "    <div class=\"parameters-section\" id=\"parametersSection\">\n      <h4>Parameters</h4>\n{groups}    </div>\n"
        )
    };

    let loading_display = if panel.is_loading() { "flex" } else { "none" };
    let disabled = if panel.can_execute() { "" } else { " disabled" };

    let response = match panel.outcome() {
        Some(outcome) => format!(
            r#"    <div class="response-section {kind}" id="responseSection">
      <h4>Response</h4>
      <pre class="response-content" id="responseContent">{body}</pre>
    </div>
"#,
            kind = if outcome.succeeded { "response-success" } else { "response-error" },
            body = escape(&outcome.body),
        ),
        None => String::new(),
    };

    format!(
        r#"<div class="modal active" id="apiModal">
  <div class="modal-content">
    <div class="modal-header">
      <span class="modal-method method-{method_class}" id="modalMethod">{method}</span>
      <h2 id="modalTitle">{name}</h2>
      <form method="get" action="/" class="modal-close-form">
        {state_fields}
        <button type="submit" class="modal-close" id="modalClose" aria-label="Close"><i class="fas fa-times"></i></button>
      </form>
    </div>
    <p class="modal-description" id="modalDescription">{desc}</p>
    <div class="endpoint-url-box"><code id="endpointUrl">{origin}{path}</code></div>
    <form method="post" action="/endpoint/{index}/execute" class="try-form" id="parametersForm">
{params}      {state_category}{state_query}
      <div class="modal-actions">
        <button type="button" class="btn btn-secondary copy-btn" id="copyUrl" data-copy-target="endpointUrl"><i class="fas fa-copy"></i> Copy URL</button>
        <button type="button" class="btn btn-secondary copy-btn" id="copyResponse" data-copy-target="responseContent"><i class="fas fa-copy"></i> Copy Response</button>
        <button type="submit" class="btn btn-primary" id="tryEndpoint"{disabled}><i class="fas fa-play"></i> Execute</button>
      </div>
    </form>
    <form method="get" action="/" class="modal-cancel-form">
      {state_fields}
      <button type="submit" class="btn btn-secondary" id="modalCancel">Cancel</button>
    </form>
    <div class="loading-response" id="loadingResponse" style="display: {loading_display}"><span class="spinner"></span> Sending request...</div>
{response}  </div>
</div>
"#,
        method_class = escape(&method.to_lowercase()),
        method = escape(method),
        name = escape(&item.name),
        state_fields = state_fields(state),
        desc = escape(&item.desc),
        origin = escape(origin),
        path = escape(item.display_path()),
        index = panel.index,
        params = params,
        state_category = hidden(STATE_CATEGORY_FIELD, state.category.key()),
        state_query = hidden(STATE_QUERY_FIELD, &state.query),
        disabled = disabled,
        loading_display = loading_display,
        response = response,
    )
}

fn render_footer(descriptor: Option<&Descriptor>, year: i32) -> String {
    let creator = text_or(
        descriptor.and_then(|d| d.api_settings.creator.as_deref()),
        FOOTER_CREATOR_FALLBACK,
    );
    format!(
        "<footer class=\"footer\"><p id=\"footerCopyright\">© {year} {}. All rights reserved.</p></footer>\n",
        escape(creator)
    )
}

/// Toast stack. Each toast fades out on its own after the queue TTL.
pub fn render_toasts(toasts: &ToastQueue) -> String {
    let ttl = toasts.ttl().as_millis();
    let items: String = toasts
        .iter()
        .map(|toast| {
            format!(
                r#"  <div class="toast {class}" role="status" style="--toast-ttl: {ttl}ms">
    <div class="toast-icon"><i class="{icon}"></i></div>
    <div class="toast-content"><div class="toast-message">{message}</div></div>
  </div>
"#,
                class = toast.kind.css_class(),
                ttl = ttl,
                icon = toast.kind.icon(),
                message = escape(&toast.message),
            )
        })
        .collect();

    format!(
        "<div class=\"toast-container\" id=\"toastContainer\" data-ttl=\"{ttl}\">\n{items}</div>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample;
    use std::time::Duration;

    fn toasts() -> ToastQueue {
        ToastQueue::new(Duration::from_secs(3))
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x&y")</script>'"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;&#x27;"
        );
    }

    #[test]
    fn test_cards_show_ready_and_stripped_path() {
        let catalog = sample();
        let state = CatalogState::default();
        let html = render_endpoints(&catalog.filter(&state), &state, "http://localhost:4000");

        assert!(html.contains("✓ Ready"));
        assert!(html.contains("maintenance"));
        assert!(html.contains("<code>http://localhost:4000/ai/chat</code>"));
        assert!(!html.contains("message=hello"));
        assert!(html.contains("method-post"));
        assert!(html.contains(r#"action="/endpoint/4""#));
        assert_eq!(html.matches("class=\"endpoint-card\"").count(), 5);
    }

    #[test]
    fn test_no_results() {
        let catalog = sample();
        let state = CatalogState::from_params(None, Some("nothing matches this"));
        let html = render_endpoints(&catalog.filter(&state), &state, "");
        assert!(html.contains("noResults"));
        assert!(!html.contains("endpointsGrid"));
    }

    #[test]
    fn test_categories_mark_active_and_count() {
        let catalog = sample();
        let state = CatalogState::from_params(Some("Tools"), Some("chat"));
        let html = render_categories(&catalog, &state);

        assert!(html.contains("All Categories"));
        assert!(html.contains("5 endpoints"));
        assert!(html.contains("3 endpoints"));
        assert!(html.contains(r#"value="Tools" class="category-item active""#));
        assert!(html.contains(r#"value="all" class="category-item""#));
        // Switching category keeps the query
        assert!(html.contains(r#"name="q" value="chat""#));
    }

    #[test]
    fn test_search_clear_keeps_category() {
        let state = CatalogState::from_params(Some("AI"), Some("user"));
        let html = render_search(&state);
        let clear_form = html.split("search-clear-form").nth(1).unwrap();
        assert!(clear_form.contains(r#"name="category" value="AI""#));
        assert!(!clear_form.contains(r#"name="q""#));
        assert!(html.contains("search-clear visible"));
    }

    #[test]
    fn test_modal_marks_invalid_inputs() {
        let catalog = sample();
        let mut panel = TryItPanel::open(3, catalog.get(3).unwrap());
        panel.submit(&[("city".to_string(), "Oslo".to_string())]);

        let html = render_modal(&panel, &CatalogState::default(), "http://h");
        assert!(html.contains(r#"class="parameter-input invalid" id="param-days""#));
        assert!(html.contains(r#"class="parameter-input" id="param-city" name="city" value="Oslo""#));
        assert!(html.contains("city *"));
        assert!(html.contains("display: none"));
        assert!(!html.contains("responseSection"));
    }

    #[test]
    fn test_modal_loading_and_result() {
        let catalog = sample();
        let mut panel = TryItPanel::open(0, catalog.get(0).unwrap());
        panel.submit(&[("message".to_string(), "hi".to_string())]);

        let loading = render_modal(&panel, &CatalogState::default(), "http://h");
        assert!(loading.contains("display: flex"));
        assert!(loading.contains(r#"id="tryEndpoint" disabled"#));

        panel.complete(Ok(serde_json::json!({"status": true, "data": "<b>"})));
        let done = render_modal(&panel, &CatalogState::default(), "http://h");
        assert!(done.contains("display: none"));
        assert!(!done.contains(" disabled"));
        assert!(done.contains("response-success"));
        assert!(done.contains("&quot;&lt;b&gt;&quot;"));
    }

    #[test]
    fn test_page_without_catalog_shows_shell_and_toast() {
        let mut queue = toasts();
        queue.error("Failed to load API documentation");
        let state = CatalogState::default();
        let html = render_page(&PageView {
            catalog: None,
            state: &state,
            theme: ThemePreference::System,
            origin: "http://h",
            panel: None,
            toasts: &queue,
            year: 2026,
        });

        assert!(html.contains("<title>Elle UI</title>"));
        assert!(html.contains("Elle API Hub"));
        assert!(html.contains("Failed to load API documentation"));
        assert_eq!(html.matches("class=\"toast ").count(), 1);
        assert!(html.contains("© 2026 Elle UI Team. All rights reserved."));
        assert!(!html.contains("endpointsGrid"));
        assert!(html.contains(r#"<body class="system-theme">"#));
    }

    #[test]
    fn test_full_page() {
        let catalog = sample();
        let state = CatalogState::default();
        let panel = TryItPanel::open(0, catalog.get(0).unwrap());
        let html = render_page(&PageView {
            catalog: Some(&catalog),
            state: &state,
            theme: ThemePreference::Dark,
            origin: "http://h",
            panel: Some(&panel),
            toasts: &toasts(),
            year: 2026,
        });

        assert!(html.contains(r#"<body class="dark-theme modal-open">"#));
        assert!(html.contains("v2.1.0"));
        assert!(html.contains("© 2026 Elle Team. All rights reserved."));
        assert!(html.contains(r#"data-target="5""#));
        assert!(html.contains(r#"action="/endpoint/0/execute""#));
    }

    #[test]
    fn test_modal_has_copy_controls() {
        let catalog = sample();
        let panel = TryItPanel::open(0, catalog.get(0).unwrap());
        let html = render_modal(&panel, &CatalogState::default(), "http://h");
        assert!(html.contains(r#"data-copy-target="endpointUrl""#));
        assert!(html.contains(r#"data-copy-target="responseContent""#));
        assert!(html.contains(r#"<code id="endpointUrl">http://h/ai/chat</code>"#));

        let state = CatalogState::default();
        let page = render_page(&PageView {
            catalog: Some(&catalog),
            state: &state,
            theme: ThemePreference::System,
            origin: "http://h",
            panel: Some(&panel),
            toasts: &toasts(),
            year: 2026,
        });
        assert!(page.contains("navigator.clipboard.writeText"));
        assert!(page.contains("Nothing to copy"));
        assert!(page.contains("Copied to clipboard"));
        assert!(page.contains("Failed to copy to clipboard"));
    }

    #[test]
    fn test_copy_script_only_with_modal() {
        let catalog = sample();
        let state = CatalogState::default();
        let page = render_page(&PageView {
            catalog: Some(&catalog),
            state: &state,
            theme: ThemePreference::System,
            origin: "http://h",
            panel: None,
            toasts: &toasts(),
            year: 2026,
        });
        assert!(!page.contains("<script>"));
        assert!(page.contains(r#"data-ttl="3000""#));
    }

    #[test]
    fn test_toast_ttl() {
        let mut queue = ToastQueue::new(Duration::from_millis(1500));
        queue.success("Copied");
        queue.info("Switched to dark theme");
        let html = render_toasts(&queue);
        assert_eq!(html.matches("--toast-ttl: 1500ms").count(), 2);
        assert!(html.contains("toast-success"));
        assert!(html.contains("toast-info"));
    }
}
