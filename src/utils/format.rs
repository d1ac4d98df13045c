use crate::types::Seconds;

const MINUTE: Seconds = 60;
const HOUR: Seconds = 60 * MINUTE;
const DAY: Seconds = 24 * HOUR;

fn unit(value: Seconds, name: &str) -> String {
    if value == 1 {
        format!("1 {}", name)
    } else {
        format!("{} {}s", value, name)
    }
}

/// Renders a travel time the way directions services do: the two most
/// significant units, minutes rounded to the nearest whole minute.
///
/// `93_900` becomes `"1 day 2 hours"`, `11_100` becomes `"3 hours 5 mins"`.
pub fn format_duration(seconds: Seconds) -> String {
    let minutes_total = (seconds + MINUTE / 2) / MINUTE;
    let total = minutes_total * MINUTE;

    let days = total / DAY;
    let hours = (total % DAY) / HOUR;
    let minutes = (total % HOUR) / MINUTE;

    if days > 0 {
        if hours > 0 {
            format!("{} {}", unit(days, "day"), unit(hours, "hour"))
        } else {
            unit(days, "day")
        }
    } else if hours > 0 {
        if minutes > 0 {
            format!("{} {}", unit(hours, "hour"), unit(minutes, "min"))
        } else {
            unit(hours, "hour")
        }
    } else {
        unit(minutes.max(1), "min")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "1 min");
        assert_eq!(format_duration(59), "1 min");
        assert_eq!(format_duration(720), "12 mins");
        assert_eq!(format_duration(3_600), "1 hour");
        assert_eq!(format_duration(11_100), "3 hours 5 mins");
        assert_eq!(format_duration(86_400), "1 day");
        assert_eq!(format_duration(93_900), "1 day 2 hours");
        assert_eq!(format_duration(2 * 86_400 + 3_600), "2 days 1 hour");
    }
}
