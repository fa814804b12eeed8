use time::{
    Date, OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Current calendar date in the given offset, time of day stripped.
pub fn today(offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(offset).date()
}

pub fn now_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

/// Unix timestamp of the first second of `date` in the given offset.
pub fn day_start_timestamp(date: Date, offset: UtcOffset) -> i64 {
    date.midnight().assume_offset(offset).unix_timestamp()
}

pub fn parse_date(value: &str) -> crate::Result<Date> {
    Date::parse(value.trim(), ISO_DATE).map_err(|_| {
        crate::Error::InvalidInput(format!("invalid date '{value}', expected YYYY-MM-DD"))
    })
}

pub fn format_date(date: Date) -> String {
    date.format(ISO_DATE).unwrap_or_else(|_| date.to_string())
}

pub fn utc_offset_from_hours(hours: i8) -> crate::Result<UtcOffset> {
    UtcOffset::from_hms(hours, 0, 0)
        .map_err(|e| crate::Error::InvalidInput(format!("invalid utc offset {hours}: {e}")))
}

/// Serde adapter for `YYYY-MM-DD` dates.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_date(&value).map_err(de::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer, de};
        use time::Date;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.serialize_some(&super::super::format_date(*date)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            let Some(value) = Option::<String>::deserialize(deserializer)? else {
                return Ok(None);
            };

            super::super::parse_date(&value)
                .map(Some)
                .map_err(de::Error::custom)
        }
    }
}
