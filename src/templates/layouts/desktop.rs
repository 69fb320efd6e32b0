use maud::{html, Markup, DOCTYPE};

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; }
header { display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
header nav ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
main.container { max-width: 1100px; margin: 2rem auto; padding: 0 1rem; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 0.5rem 0.75rem; border-bottom: 1px solid #e5e7eb; vertical-align: top; }
.badge { padding: 2px 8px; border-radius: 9999px; font-size: 0.85em; }
.badge-open { background: #fee2e2; color: #991b1b; }
.badge-resolved { background: #dcfce7; color: #166534; }
.stats { display: flex; gap: 1.5rem; margin-bottom: 1rem; }
button { cursor: pointer; padding: 4px 12px; border: none; border-radius: 4px; background: #524ed2; color: white; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (maud::PreEscaped(STYLES)) }
            }
            body {
                header {
                    h3 { "Resident Help Desk" }
                    nav {
                        ul {
                            li { a href="/dashboard" { "Dashboard" } }
                            li { a href="/tickets" { "Tickets (JSON)" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
