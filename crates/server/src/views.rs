//! Minimal HTML rendering for the page routes. Everything user-supplied goes
//! through [`escape`] before it is written.

use std::fmt::Write;

use models::employee;
use service::directory::query::SortField;
use service::directory::{EmployeeInput, EmployeePage, ListParams};

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

pub fn layout(title: &str, user: Option<&str>, body: &str) -> String {
    let nav = match user {
        Some(name) => format!(
            "<span>{}</span> <form method=\"post\" action=\"/logout\" class=\"inline\"><button>Log out</button></form>",
            escape(name)
        ),
        None => "<a href=\"/login\">Log in</a>".to_string(),
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{title}</title></head>\
         <body><header><a href=\"/\">Staff directory</a> {nav}</header><main>{body}</main></body></html>",
        title = escape(title),
    )
}

fn option(value: &str, label: &str, selected: Option<&str>) -> String {
    let sel = if selected == Some(value) { " selected" } else { "" };
    format!("<option value=\"{}\"{sel}>{}</option>", escape(value), escape(label))
}

fn hidden(name: &str, value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => format!("<input type=\"hidden\" name=\"{name}\" value=\"{}\">", escape(v)),
        _ => String::new(),
    }
}

const SEARCH_FIELDS: [(&str, &str); 7] = [
    ("", "any field"),
    ("full_name", "full name"),
    ("position", "position"),
    ("phone", "phone"),
    ("email", "email"),
    ("gender", "gender"),
    ("on_probation", "on probation"),
];

const SORT_FIELDS: [SortField; 8] = [
    SortField::FullName,
    SortField::Id,
    SortField::Position,
    SortField::Gender,
    SortField::Phone,
    SortField::Email,
    SortField::OnProbation,
    SortField::HireDate,
];

fn search_form(params: &ListParams) -> String {
    let mut out = String::from("<form method=\"get\" action=\"/\">");
    let _ = write!(
        out,
        "<input type=\"search\" name=\"search\" value=\"{}\" placeholder=\"Search\">",
        escape(params.search.as_deref().unwrap_or(""))
    );
    out.push_str("<select name=\"field\">");
    for (value, label) in SEARCH_FIELDS {
        out.push_str(&option(value, label, Some(params.field.as_deref().unwrap_or(""))));
    }
    out.push_str("</select><select name=\"sort_by\">");
    let sort = params.sort.as_deref().or(params.sort_by.as_deref());
    let current = SortField::from_param(sort).as_str();
    for f in SORT_FIELDS {
        out.push_str(&option(f.as_str(), f.as_str(), Some(current)));
    }
    out.push_str("</select><select name=\"order\">");
    let order = params.order.as_deref().unwrap_or("asc").to_ascii_lowercase();
    out.push_str(&option("asc", "ascending", Some(order.as_str())));
    out.push_str(&option("desc", "descending", Some(order.as_str())));
    out.push_str("</select><button>Apply</button></form>");
    out
}

fn pager_button(params: &ListParams, page: u64, label: &str) -> String {
    let sort = params.sort.as_deref().or(params.sort_by.as_deref());
    format!(
        "<form method=\"get\" action=\"/\" class=\"inline\">{}{}{}{}<input type=\"hidden\" name=\"page\" value=\"{page}\"><button>{label}</button></form>",
        hidden("search", params.search.as_deref()),
        hidden("field", params.field.as_deref()),
        hidden("sort_by", sort),
        hidden("order", params.order.as_deref()),
    )
}

fn row(m: &employee::Model, editable: bool) -> String {
    let mut out = format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
        m.id,
        escape(&m.full_name),
        escape(&m.position),
        m.gender.label(),
        escape(&m.phone),
        escape(&m.email),
        if m.on_probation { "yes" } else { "no" },
        m.hire_date,
    );
    if editable {
        let _ = write!(
            out,
            "<td><a href=\"/employee/{id}/edit\">Edit</a> \
             <form method=\"post\" action=\"/employee/{id}/delete\" class=\"inline\"><button>Delete</button></form></td>",
            id = m.id
        );
    }
    out.push_str("</tr>");
    out
}

pub fn employee_list(page: &EmployeePage, params: &ListParams, user: Option<&str>) -> String {
    let editable = user.is_some();
    let mut body = search_form(params);
    if editable {
        body.push_str("<p><a href=\"/employee/new\">Add employee</a></p>");
    }
    let _ = write!(body, "<p>{} found</p>", page.total);
    body.push_str(
        "<table><thead><tr><th>id</th><th>full name</th><th>position</th><th>gender</th>\
         <th>phone</th><th>email</th><th>on probation</th><th>hire date</th>",
    );
    if editable {
        body.push_str("<th></th>");
    }
    body.push_str("</tr></thead><tbody>");
    for m in &page.items {
        body.push_str(&row(m, editable));
    }
    body.push_str("</tbody></table><nav>");
    let current = page.window.page();
    if current > 1 {
        body.push_str(&pager_button(params, current - 1, "Previous"));
    }
    if page.window.offset + (page.items.len() as u64) < page.total {
        body.push_str(&pager_button(params, current + 1, "Next"));
    }
    body.push_str("</nav>");
    layout("Employees", user, &body)
}

pub fn login_form(error: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(e) = error {
        let _ = write!(body, "<p class=\"error\">{}</p>", escape(e));
    }
    body.push_str(
        "<form method=\"post\" action=\"/login\">\
         <label>Login <input name=\"login\" autocomplete=\"username\"></label>\
         <label>Password <input type=\"password\" name=\"password\" autocomplete=\"current-password\"></label>\
         <button>Log in</button></form>",
    );
    layout("Log in", None, &body)
}

fn text_input(name: &str, label: &str, value: Option<&str>, kind: &str) -> String {
    format!(
        "<label>{label} <input type=\"{kind}\" name=\"{name}\" value=\"{}\"></label>",
        escape(value.unwrap_or(""))
    )
}

/// Create/edit form, pre-filled with `input`. `error` is `(field, message)`.
pub fn employee_form(title: &str, action: &str, input: &EmployeeInput, error: Option<(&str, &str)>, user: Option<&str>) -> String {
    let mut body = format!("<h1>{}</h1>", escape(title));
    if let Some((field, message)) = error {
        let _ = write!(body, "<p class=\"error\">{}: {}</p>", escape(field), escape(message));
    }
    let _ = write!(body, "<form method=\"post\" action=\"{}\">", escape(action));
    body.push_str(&text_input("full_name", "Full name", input.full_name.as_deref(), "text"));
    body.push_str(&text_input("position", "Position", input.position.as_deref(), "text"));
    let gender = input.gender.as_deref().and_then(models::employee::Gender::parse).map(|g| g.label());
    body.push_str("<label>Gender <select name=\"gender\">");
    body.push_str(&option("male", "male", gender));
    body.push_str(&option("female", "female", gender));
    body.push_str("</select></label>");
    body.push_str(&text_input("phone", "Phone", input.phone.as_deref(), "tel"));
    body.push_str(&text_input("email", "Email", input.email.as_deref(), "email"));
    let checked = if input.on_probation.unwrap_or(false) { " checked" } else { "" };
    let _ = write!(body, "<label>On probation <input type=\"checkbox\" name=\"on_probation\" value=\"true\"{checked}></label>");
    body.push_str(&text_input("hire_date", "Hire date", input.hire_date.as_deref(), "date"));
    body.push_str("<button>Save</button></form>");
    layout(title, user, &body)
}
