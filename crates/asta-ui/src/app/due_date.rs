use asta_shared::DUE_DATE_PLACEHOLDER;
use chrono::{
  DateTime,
  Local,
  Locale,
  NaiveDate,
  NaiveDateTime,
  NaiveTime
};

const DATE_FORMAT: &str = "%a, %b %-d";
const TIME_FORMAT: &str = "%H:%M";

// Offset-less timestamps are wall
// time, as the backend stores them.
const NAIVE_FORMATS: [&str; 3] = [
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M"
];

enum ParsedDue {
  Timed(NaiveDateTime),
  DateOnly(NaiveDate)
}

pub fn browser_locale() -> Locale {
  web_sys::window()
    .and_then(|window| {
      window.navigator().language()
    })
    .map(|tag| parse_locale(&tag))
    .unwrap_or(Locale::en_US)
}

/// Maps a BCP 47 tag such as `de-DE`
/// (or a bare `de`) onto a chrono
/// locale.
pub fn parse_locale(
  tag: &str
) -> Locale {
  let normalized =
    tag.trim().replace('-', "_");
  if let Ok(locale) = Locale::try_from(
    normalized.as_str()
  ) {
    return locale;
  }

  if !normalized.contains('_')
    && !normalized.is_empty()
  {
    let guess = format!(
      "{}_{}",
      normalized.to_lowercase(),
      normalized.to_uppercase()
    );
    if let Ok(locale) =
      Locale::try_from(guess.as_str())
    {
      return locale;
    }
  }

  tracing::debug!(
    tag,
    "unknown browser locale; using \
     en_US"
  );
  Locale::en_US
}

pub fn format_due_date(
  due: Option<&str>,
  all_day: bool,
  locale: Locale
) -> String {
  let Some(raw) = due
    .map(str::trim)
    .filter(|raw| !raw.is_empty())
  else {
    return DUE_DATE_PLACEHOLDER
      .to_string();
  };

  match parse_due(raw) {
    | Some(ParsedDue::DateOnly(
      date
    )) => format_date(
      date.and_time(NaiveTime::MIN),
      locale
    ),
    | Some(ParsedDue::Timed(at))
      if all_day =>
    {
      format_date(at, locale)
    }
    | Some(ParsedDue::Timed(at)) => {
      format!(
        "{}, {}",
        format_date(at, locale),
        at.and_utc().format_localized(
          TIME_FORMAT,
          locale
        )
      )
    }
    | None => {
      tracing::debug!(
        raw,
        "unparseable due date shown \
         verbatim"
      );
      raw.to_string()
    }
  }
}

fn parse_due(
  raw: &str
) -> Option<ParsedDue> {
  if let Ok(at) =
    DateTime::parse_from_rfc3339(raw)
  {
    return Some(ParsedDue::Timed(
      at.with_timezone(&Local)
        .naive_local()
    ));
  }

  for format in NAIVE_FORMATS {
    if let Ok(at) =
      NaiveDateTime::parse_from_str(
        raw, format
      )
    {
      return Some(ParsedDue::Timed(at));
    }
  }

  NaiveDate::parse_from_str(
    raw, "%Y-%m-%d"
  )
  .ok()
  .map(ParsedDue::DateOnly)
}

fn format_date(
  at: NaiveDateTime,
  locale: Locale
) -> String {
  at.and_utc()
    .format_localized(
      DATE_FORMAT,
      locale
    )
    .to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_due_date_renders_placeholder(
  ) {
    assert_eq!(
      format_due_date(
        None,
        false,
        Locale::en_US
      ),
      DUE_DATE_PLACEHOLDER
    );
    assert_eq!(
      format_due_date(
        Some("   "),
        true,
        Locale::en_US
      ),
      DUE_DATE_PLACEHOLDER
    );
  }

  #[test]
  fn timed_due_date_includes_time() {
    assert_eq!(
      format_due_date(
        Some("2025-09-18T17:00:00"),
        false,
        Locale::en_US
      ),
      "Thu, Sep 18, 17:00"
    );
    assert_eq!(
      format_due_date(
        Some(
          "2025-09-18T17:05:00.123456"
        ),
        false,
        Locale::en_US
      ),
      "Thu, Sep 18, 17:05"
    );
  }

  #[test]
  fn all_day_never_renders_time() {
    let rendered = format_due_date(
      Some("2025-09-18T17:00:00"),
      true,
      Locale::en_US
    );
    assert_eq!(rendered, "Thu, Sep 18");
    assert!(!rendered.contains(':'));
  }

  #[test]
  fn bare_date_is_treated_as_all_day() {
    assert_eq!(
      format_due_date(
        Some("2025-09-18"),
        false,
        Locale::en_US
      ),
      "Thu, Sep 18"
    );
  }

  #[test]
  fn offset_timestamp_is_parsed() {
    let rendered = format_due_date(
      Some("2025-09-18T12:00:00+00:00"),
      false,
      Locale::en_US
    );
    assert!(rendered.contains("Sep"));
    assert!(rendered.contains(':'));
  }

  #[test]
  fn unparseable_due_date_is_shown_verbatim(
  ) {
    assert_eq!(
      format_due_date(
        Some("next friday"),
        false,
        Locale::en_US
      ),
      "next friday"
    );
  }

  #[test]
  fn browser_tags_map_to_locales() {
    assert!(matches!(
      parse_locale("de-DE"),
      Locale::de_DE
    ));
    assert!(matches!(
      parse_locale("fr"),
      Locale::fr_FR
    ));
    assert!(matches!(
      parse_locale("not-a-locale"),
      Locale::en_US
    ));
  }
}
