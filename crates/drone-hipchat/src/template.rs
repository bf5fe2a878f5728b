//! Message templates
//!
//! Templates are Handlebars strings rendered against [`Payload`]. Rendering
//! is strict: referencing a field that does not exist is an error.
//!
//! ## Helpers
//!
//! - `uppercasefirst s`, `uppercase s`, `lowercase s`
//! - `truncate s n`: first `n` characters of `s`
//! - `duration start end`: elapsed time between two unix timestamps
//! - `datetime ts fmt`: unix timestamp formatted with a strftime pattern (UTC)
//! - `urlencode s`: `application/x-www-form-urlencoded` encoding of `s`

use crate::context::Payload;
use chrono::format::{Item, StrftimeItems};
use chrono::DateTime;
use handlebars::{
    handlebars_helper, Context, Handlebars, Helper, HelperResult, Output, RenderContext,
    RenderError, RenderErrorReason,
};
use tracing::warn;

handlebars_helper!(uppercasefirst: |s: str| upper_first(s));
handlebars_helper!(uppercase: |s: str| s.to_uppercase());
handlebars_helper!(lowercase: |s: str| s.to_lowercase());
handlebars_helper!(truncate: |s: str, n: u64| truncate_chars(s, n as usize));
handlebars_helper!(duration: |started: i64, finished: i64| {
    format_duration(finished.saturating_sub(started))
});
handlebars_helper!(urlencode: |s: str| {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect::<String>()
});

/// Renders templates against a build payload
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer with all helpers registered
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_helper("uppercasefirst", Box::new(uppercasefirst));
        registry.register_helper("uppercase", Box::new(uppercase));
        registry.register_helper("lowercase", Box::new(lowercase));
        registry.register_helper("truncate", Box::new(truncate));
        registry.register_helper("duration", Box::new(duration));
        registry.register_helper("datetime", Box::new(datetime));
        registry.register_helper("urlencode", Box::new(urlencode));
        Renderer { registry }
    }

    /// Render `template`, returning the render error on failure
    pub fn try_render(&self, payload: &Payload, template: &str) -> Result<String, RenderError> {
        let rendered = self.registry.render_template(template, payload)?;
        Ok(rendered.trim().to_string())
    }

    /// Render `template`; a failed render yields the error text instead so a
    /// broken template never stops the notification.
    pub fn render(&self, payload: &Payload, template: &str) -> String {
        match self.try_render(payload, template) {
            Ok(rendered) => rendered,
            Err(err) => {
                warn!(error = %err, "template rendering failed, sending error text");
                err.to_string()
            }
        }
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Format seconds as hours, minutes and seconds, e.g. `1h2m3s`, `1m30s`, `0s`
pub fn format_duration(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{secs}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{secs}s")
    } else {
        format!("{sign}{secs}s")
    }
}

fn datetime(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let timestamp = h
        .param(0)
        .and_then(|p| p.value().as_i64())
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("datetime", 0))?;
    let pattern = h
        .param(1)
        .and_then(|p| p.value().as_str())
        .unwrap_or("%Y-%m-%d %H:%M:%S");

    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        let reason = RenderErrorReason::Other(format!("invalid datetime format: {pattern}"));
        return Err(reason.into());
    }
    let at = DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
        RenderErrorReason::Other(format!("timestamp out of range: {timestamp}"))
    })?;

    out.write(&at.format(pattern).to_string())?;
    Ok(())
}
