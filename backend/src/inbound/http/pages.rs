//! Server-rendered HTML pages.
//!
//! Every value that originates from a user or the store goes through
//! [`escape_html`] before it is placed in markup. Failures on HTML routes are
//! rendered by [`PageError`] as a short message with a way back; the
//! underlying cause is only logged.

use std::fmt::{self, Write as _};

use actix_web::http::StatusCode;
use actix_web::http::header::{ContentType, LOCATION};
use actix_web::{HttpResponse, HttpResponseBuilder, ResponseError};
use tracing::{error, info};

use super::error::status_for;
use crate::domain::ports::{PatientError, StoreError};
use crate::domain::{
    AuthError, CredentialsValidationError, Error, MissingField, Patient, PatientValidationError,
    TRACE_ID_HEADER,
};

const STYLESHEET: &str = "/styles.css";

/// Static login form; anonymous visitors and signed-out users land here.
pub const LOGIN_PAGE: &str = "/login.html";
/// Static registration form.
pub const REGISTER_PAGE: &str = "/registro.html";

/// `302 Found` pointing at `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}

/// Escape the five HTML-significant characters.
///
/// # Examples
/// ```
/// use clinic_backend::inbound::http::pages::escape_html;
///
/// assert_eq!(escape_html("<b>\"Ana\" & 'Luis'</b>"),
///     "&lt;b&gt;&quot;Ana&quot; &amp; &#39;Luis&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Incrementally built HTML document.
///
/// Text passed to [`Page::heading`] and [`Page::paragraph`] is escaped;
/// [`Page::raw`] takes markup that the caller has already escaped.
#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    body: String,
}

impl Page {
    pub fn new(title: &str) -> Self {
        Self {
            title: escape_html(title),
            body: String::new(),
        }
    }

    pub fn heading(mut self, text: &str) -> Self {
        let _ = write!(self.body, "<h1>{}</h1>", escape_html(text));
        self
    }

    pub fn paragraph(mut self, text: &str) -> Self {
        let _ = write!(self.body, "<p>{}</p>", escape_html(text));
        self
    }

    pub fn raw(mut self, markup: &str) -> Self {
        self.body.push_str(markup);
        self
    }

    /// Button returning to `href`, which must be a local path.
    pub fn back_button(mut self, href: &str) -> Self {
        let _ = write!(
            self.body,
            "<button onclick=\"window.location.href='{}'\">Volver</button>",
            escape_html(href)
        );
        self
    }

    pub fn render(&self) -> String {
        format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
             <link rel=\"stylesheet\" href=\"{STYLESHEET}\"><title>{}</title></head>\
             <body>{}</body></html>",
            self.title, self.body
        )
    }

    pub fn respond(&self, status: StatusCode) -> HttpResponse {
        Self::html(HttpResponse::build(status), self.render())
    }

    fn html(mut builder: HttpResponseBuilder, body: String) -> HttpResponse {
        builder.content_type(ContentType::html()).body(body)
    }
}

/// Render an HTML table. Header labels are escaped; cells must already be
/// escaped markup.
pub(crate) fn table<I>(headers: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut html = String::from("<table><thead><tr>");
    for header in headers {
        let _ = write!(html, "<th>{}</th>", escape_html(header));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{cell}</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// Escaped name, age and heart-rate cells of a patient row.
pub(crate) fn patient_cells(patient: &Patient) -> Vec<String> {
    vec![
        escape_html(&patient.name),
        patient.age.to_string(),
        patient.heart_rate.to_string(),
    ]
}

/// Domain error rendered as an HTML page.
#[derive(Debug)]
pub struct PageError {
    error: Error,
    back: &'static str,
}

impl PageError {
    pub fn new(error: Error) -> Self {
        Self { error, back: "/" }
    }

    /// Point the page's back button at `href`.
    pub fn back_to(mut self, href: &'static str) -> Self {
        self.back = href;
        self
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        status_for(self.error.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = self.error.trace_id();
        if status.is_server_error() {
            error!(code = ?self.error.code(), message = %self.error.message(), trace_id, "page request failed");
        } else {
            info!(code = ?self.error.code(), message = %self.error.message(), trace_id, "page request rejected");
        }
        let shown = self.error.redacted();
        let mut builder = HttpResponse::build(status);
        if let Some(id) = trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        let page = Page::new("Error")
            .heading(shown.message())
            .back_button(self.back);
        Page::html(builder, page.render())
    }
}

macro_rules! page_error_from {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for PageError {
                fn from(value: $source) -> Self {
                    Self::new(Error::from(value))
                }
            }
        )+
    };
}

page_error_from!(
    Error,
    AuthError,
    PatientError,
    StoreError,
    CredentialsValidationError,
);

impl From<PatientValidationError> for PageError {
    fn from(value: PatientValidationError) -> Self {
        Self::new(PatientError::from(value).into())
    }
}

impl From<MissingField> for PageError {
    fn from(value: MissingField) -> Self {
        Self::new(Error::invalid_request("Debes llenar todos los campos.").with_details(
            serde_json::json!({ "field": value.field }),
        ))
    }
}

/// Result alias for HTML handlers.
pub type PageResult<T> = Result<T, PageError>;
