//! Conversions shared by shift and training payloads.

use chrono::{FixedOffset, NaiveDate};
use hrdesk_core::{DomainError, UserId};
use serde_json::{Map, Value, json};

use crate::timeconv::{
    from_utc_date, from_utc_time, local_day_end_utc, local_day_start_utc, to_iso, to_utc_date,
    to_utc_time,
};

/// Local wall-clock fields to their UTC wire form.
pub(crate) fn outbound(
    times: [&mut Option<String>; 4],
    dates: [&mut Option<String>; 2],
    offset: FixedOffset,
) -> Result<(), DomainError> {
    for time in times {
        if let Some(value) = time.as_deref().filter(|v| !v.is_empty()) {
            *time = Some(to_utc_time(value, offset)?);
        }
    }
    for date in dates {
        if let Some(value) = date.as_deref().filter(|v| !v.is_empty()) {
            *date = Some(to_utc_date(value)?);
        }
    }
    Ok(())
}

/// UTC wire fields back to local wall-clock values.
pub(crate) fn inbound(
    times: [&mut Option<String>; 4],
    dates: [&mut Option<String>; 2],
    offset: FixedOffset,
) {
    for time in times {
        if let Some(value) = time.as_mut() {
            *value = from_utc_time(value, offset);
        }
    }
    for date in dates {
        if let Some(value) = date.as_mut() {
            *value = from_utc_date(value, offset);
        }
    }
}

/// Employees to attach to a shift or training for a validity window.
///
/// The window opens at local midnight of `valid_from` and, when bounded,
/// closes at the last millisecond of `valid_till`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub code: String,
    pub employee_ids: Vec<UserId>,
    pub valid_from: NaiveDate,
    pub valid_till: Option<NaiveDate>,
}

impl Assignment {
    pub(crate) fn body(&self, code_key: &str, offset: FixedOffset) -> Result<Value, DomainError> {
        if self.code.trim().is_empty() {
            return Err(DomainError::validation(format!("{code_key} is required")));
        }
        if let Some(till) = self.valid_till.filter(|till| *till < self.valid_from) {
            return Err(DomainError::validation(format!(
                "assignment ends ({till}) before it starts ({})",
                self.valid_from
            )));
        }

        let mut body = Map::new();
        body.insert("addUserIds".into(), json!(self.employee_ids));
        body.insert("removeUserIds".into(), json!([]));
        body.insert(code_key.into(), json!(self.code));
        body.insert(
            "startDate".into(),
            json!(to_iso(local_day_start_utc(self.valid_from, offset)?)),
        );
        if let Some(till) = self.valid_till {
            body.insert("endDate".into(), json!(to_iso(local_day_end_utc(till, offset)?)));
        }
        Ok(Value::Object(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(19800).unwrap()
    }

    #[test]
    fn assignment_window_in_utc() {
        let assignment = Assignment {
            code: "GEN".into(),
            employee_ids: vec![UserId::new("u1").unwrap()],
            valid_from: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            valid_till: NaiveDate::from_ymd_opt(2024, 1, 31),
        };
        let body = assignment.body("shiftCode", ist()).unwrap();
        assert_eq!(
            body,
            json!({
                "addUserIds": ["u1"],
                "removeUserIds": [],
                "shiftCode": "GEN",
                "startDate": "2024-01-09T18:30:00.000Z",
                "endDate": "2024-01-31T18:29:59.999Z"
            })
        );
    }

    #[test]
    fn open_ended_assignment_omits_end() {
        let assignment = Assignment {
            code: "T-101".into(),
            employee_ids: vec![],
            valid_from: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            valid_till: None,
        };
        let body = assignment.body("trainingCode", FixedOffset::east_opt(0).unwrap()).unwrap();
        assert!(body.get("endDate").is_none());
        assert_eq!(body["startDate"], "2024-01-10T00:00:00.000Z");
    }

    #[test]
    fn inverted_window_is_rejected() {
        let assignment = Assignment {
            code: "GEN".into(),
            employee_ids: vec![],
            valid_from: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            valid_till: NaiveDate::from_ymd_opt(2024, 1, 1),
        };
        assert!(assignment.body("shiftCode", ist()).is_err());
    }

    #[test]
    fn inbound_passes_unparseable_values_through() {
        let mut start = Some("04:00".to_string());
        let mut end = Some("whenever".to_string());
        let mut window_start = None;
        let mut window_end = Some(String::new());
        let mut from = Some("2024-01-09T18:30:00.000Z".to_string());
        let mut till = None;
        inbound(
            [&mut start, &mut end, &mut window_start, &mut window_end],
            [&mut from, &mut till],
            ist(),
        );
        assert_eq!(start.as_deref(), Some("09:30"));
        assert_eq!(end.as_deref(), Some("whenever"));
        assert_eq!(window_end.as_deref(), Some(""));
        assert_eq!(from.as_deref(), Some("2024-01-10"));
    }
}
