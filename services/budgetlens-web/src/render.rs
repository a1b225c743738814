//! HTML rendering
//!
//! Plain `format!` templates around a shared layout. Every value that
//! originates from user input or the remote API goes through [`escape`].

use budgetlens_analysis::{format_milliunits, CategorySummary};
use budgetlens_session::User;
use budgetlens_ynab::{Budget, MonthDetail};

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 0; background: #f8fafc; color: #0f172a; }
    header { background: #1e293b; color: #f8fafc; padding: 1rem 2rem; display: flex; justify-content: space-between; }
    header a { color: #93c5fd; text-decoration: none; margin-left: 1rem; }
    main { max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
    .error { background: #fef2f2; border: 1px solid #fecaca; color: #b91c1c; padding: .5rem 1rem; border-radius: .25rem; margin-bottom: 1rem; }
    form { margin: 1rem 0; }
    label { display: block; margin-bottom: .25rem; font-weight: 600; }
    input[type=text], input[type=password], select { padding: .4rem; border: 1px solid #94a3b8; border-radius: .25rem; min-width: 18rem; }
    button { background: #2563eb; color: white; border: 0; border-radius: .25rem; padding: .5rem 1rem; cursor: pointer; }
    table { border-collapse: collapse; width: 100%; margin-top: 1rem; }
    th, td { border: 1px solid #cbd5e1; padding: .4rem .6rem; text-align: left; }
    td.amount { text-align: right; font-variant-numeric: tabular-nums; }
    .totals p { margin: .2rem 0; }
"#;

/// Escape a value for HTML text or attribute context.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - BudgetLens</title>
<style>{STYLE}</style>
</head>
<body>
<header>
  <strong>BudgetLens</strong>
  <nav>
    <a href="/">Home</a>
    <a href="/analysis">Analysis</a>
    <a href="/profile">Profile</a>
  </nav>
</header>
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    )
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(r#"<div class="error">{}</div>"#, escape(message)),
        None => String::new(),
    }
}

fn hidden_redirect_field(redirect_to: Option<&str>) -> String {
    match redirect_to {
        Some(to) => format!(
            r#"<input type="hidden" name="redirectTo" value="{}">"#,
            escape(to)
        ),
        None => String::new(),
    }
}

/// Home page: session status and entry points.
pub fn home_page(user_email: Option<&str>, has_token: bool, budget_id: Option<&str>) -> String {
    let identity = match user_email {
        Some(email) => format!(
            r#"<p>Signed in as <strong>{}</strong>.</p>
<form method="post" action="/logout"><button type="submit">Sign out</button></form>"#,
            escape(email)
        ),
        None => r#"<p>Not signed in. <a href="/login">Sign in</a></p>"#.to_string(),
    };
    let token = if has_token {
        r#"<p>Access token on file. <a href="/analysis">Go to analysis</a></p>"#.to_string()
    } else {
        r#"<p>No access token yet. <a href="/accessToken">Add one</a></p>"#.to_string()
    };
    let budget = match budget_id {
        Some(id) => format!(
            r#"<p>Selected budget: <a href="/analysis/{id}/current">{id}</a></p>"#,
            id = escape(id)
        ),
        None => String::new(),
    };
    layout("Home", &format!("<h1>BudgetLens</h1>{identity}{token}{budget}"))
}

/// Login form.
pub fn login_page(redirect_to: Option<&str>, error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Sign in</h1>
{banner}
<form method="post" action="/login">
  <label for="email">Email</label>
  <input type="text" id="email" name="email" autofocus>
  <p><label><input type="checkbox" name="remember" value="on"> Remember me</label></p>
  {redirect}
  <button type="submit">Sign in</button>
</form>"#,
        banner = error_banner(error),
        redirect = hidden_redirect_field(redirect_to),
    );
    layout("Sign in", &body)
}

/// Access token entry form.
pub fn access_token_page(redirect_to: Option<&str>, error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Access token</h1>
{banner}
<form method="post" action="/accessToken">
  <label for="accessToken">Enter your personal access token:</label>
  <input type="password" id="accessToken" name="accessToken" autofocus>
  {redirect}
  <button type="submit">Submit Access Token</button>
</form>"#,
        banner = error_banner(error),
        redirect = hidden_redirect_field(redirect_to),
    );
    layout("Access token", &body)
}

/// Budget picker.
pub fn budget_picker_page(budgets: &[Budget], error: Option<&str>) -> String {
    let form = if budgets.is_empty() {
        "<p>No budgets found!</p>".to_string()
    } else {
        let options: String = budgets
            .iter()
            .map(|budget| {
                let label = match &budget.last_modified_on {
                    Some(ts) => format!(
                        "{} (Last modified on {})",
                        escape(&budget.name),
                        escape(ts)
                    ),
                    None => escape(&budget.name),
                };
                format!(
                    r#"<option value="{}">{}</option>"#,
                    escape(&budget.id),
                    label
                )
            })
            .collect();
        format!(
            r#"<form method="post" action="/analysis">
  <label for="budget">Select budget:</label>
  <select id="budget" name="budget">{options}</select>
  <button type="submit">Select budget</button>
</form>"#
        )
    };
    layout(
        "Select budget",
        &format!("<h1>Budgets</h1>{}{form}", error_banner(error)),
    )
}

/// Month summary: totals plus the category table.
pub fn month_page(
    budget_id: &str,
    month_label: &str,
    detail: &MonthDetail,
    rows: &[CategorySummary],
) -> String {
    let table_rows: String = rows
        .iter()
        .map(|row| {
            format!(
                r#"<tr><td>{}</td><td class="amount">{}</td><td class="amount">{}</td><td class="amount">{}</td></tr>"#,
                escape(&row.name),
                format_milliunits(row.budgeted),
                format_milliunits(row.assigned),
                format_milliunits(row.actual),
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Month analysis</h1>
<p>Budget: {budget}</p>
<p>Month: {month}</p>
<div class="totals">
  <p>Total Income: {income}</p>
  <p>Total Outflow: {activity}</p>
  <p>Total Budgeted: {budgeted}</p>
</div>
<table>
  <tr><th>name</th><th>budgeted</th><th>assigned</th><th>actual</th></tr>
  {table_rows}
</table>"#,
        budget = escape(budget_id),
        month = escape(month_label),
        income = format_milliunits(detail.income),
        activity = format_milliunits(detail.activity),
        budgeted = format_milliunits(detail.budgeted),
    );
    layout("Month analysis", &body)
}

/// Profile page for a signed-in user with a linked token.
pub fn profile_page(user: &User, budget_id: Option<&str>, access_token: &str) -> String {
    let tail: String = access_token
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    let token_hint = if access_token.chars().count() > 4 {
        format!("…{}", escape(&tail))
    } else {
        "configured".to_string()
    };
    let budget = match budget_id {
        Some(id) => format!(
            r#"<p>Selected budget: <a href="/analysis/{id}/current">{id}</a></p>"#,
            id = escape(id)
        ),
        None => r#"<p>No budget selected yet. <a href="/analysis">Pick one</a></p>"#.to_string(),
    };
    let body = format!(
        r#"<h1>Profile</h1>
<p>Email: <strong>{}</strong></p>
<p>Access token: {token_hint}</p>
{budget}"#,
        escape(&user.email),
    );
    layout("Profile", &body)
}

/// Generic error page.
pub fn error_page(title: &str, message: &str) -> String {
    layout(
        title,
        &format!(
            "<h1>{}</h1><p>{}</p><p><a href=\"/\">Back home</a></p>",
            escape(title),
            escape(message)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>&"quoted"'</b>"#),
            "&lt;b&gt;&amp;&quot;quoted&quot;&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_budget_picker_escapes_names() {
        let budgets = vec![Budget {
            id: "b-1".to_string(),
            name: "<script>alert(1)</script>".to_string(),
            last_modified_on: None,
        }];
        let html = budget_picker_page(&budgets, None);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_login_page_carries_redirect() {
        let html = login_page(Some("/profile"), None);
        assert!(html.contains(r#"name="redirectTo" value="/profile""#));
    }
}
