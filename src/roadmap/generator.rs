use crate::roadmap::curriculum::{
    ThemedMonth, DAYS_PER_MONTH, FOUNDATION_TOPICS, THEMED_MONTHS, TOTAL_DAYS,
    WEEKLY_PROJECT_TOPIC, WEEKLY_REVISION_TOPIC,
};
use crate::roadmap::repo_types::NewDayTask;

/// Position of a weekend day inside its 7-day cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekendSlot {
    Sixth,
    Seventh,
}

/// Weekend cycle runs on the absolute day number, never on the month offset.
pub fn weekend_slot(day_number: i32) -> Option<WeekendSlot> {
    match day_number % 7 {
        6 => Some(WeekendSlot::Sixth),
        0 => Some(WeekendSlot::Seventh),
        _ => None,
    }
}

pub fn is_weekend(day_number: i32) -> bool {
    weekend_slot(day_number).is_some()
}

pub fn month_for_day(day_number: i32) -> i32 {
    (day_number - 1) / DAYS_PER_MONTH + 1
}

/// Builds the full 168-day roadmap in day order.
pub fn generate_roadmap() -> Vec<NewDayTask> {
    let mut days = Vec::with_capacity(TOTAL_DAYS as usize);

    // Month 1 keeps its scripted topic even on weekends.
    for (i, topic) in FOUNDATION_TOPICS.iter().enumerate() {
        let day_number = i as i32 + 1;
        days.push(NewDayTask {
            day_number,
            topic: (*topic).to_string(),
            month: month_for_day(day_number),
            is_weekend: is_weekend(day_number),
        });
    }

    for month in THEMED_MONTHS.iter() {
        days.extend(themed_month_days(month));
    }

    days
}

fn themed_month_days(month: &ThemedMonth) -> impl Iterator<Item = NewDayTask> + '_ {
    (month.first_day..=month.last_day).map(move |day_number| {
        let slot = weekend_slot(day_number);
        let topic = match slot {
            Some(WeekendSlot::Sixth) => WEEKLY_PROJECT_TOPIC.to_string(),
            Some(WeekendSlot::Seventh) => WEEKLY_REVISION_TOPIC.to_string(),
            None => format!(
                "{} - Day {}",
                month.theme,
                day_number - month.first_day + 1
            ),
        };
        NewDayTask {
            day_number,
            topic,
            month: month.month,
            is_weekend: slot.is_some(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: i32) -> NewDayTask {
        generate_roadmap()
            .into_iter()
            .find(|d| d.day_number == n)
            .expect("day present")
    }

    #[test]
    fn generates_days_one_to_168_in_order() {
        let days = generate_roadmap();
        assert_eq!(days.len(), 168);
        let numbers: Vec<i32> = days.iter().map(|d| d.day_number).collect();
        assert_eq!(numbers, (1..=168).collect::<Vec<_>>());
    }

    #[test]
    fn month_and_weekend_follow_day_number() {
        for d in generate_roadmap() {
            assert_eq!(d.month, 1 + (d.day_number - 1) / 28, "day {}", d.day_number);
            let m = d.day_number % 7;
            assert_eq!(d.is_weekend, m == 6 || m == 0, "day {}", d.day_number);
            assert_eq!(d.month, month_for_day(d.day_number));
        }
    }

    #[test]
    fn month_one_uses_scripted_topics() {
        assert_eq!(day(1).topic, "Install Python, VS Code, Jupyter");
        assert_eq!(day(28).topic, "Revision");
    }

    #[test]
    fn month_one_weekend_keeps_scripted_topic() {
        let d = day(6);
        assert!(d.is_weekend);
        assert_eq!(d.topic, "Update LinkedIn");
        let d = day(7);
        assert!(d.is_weekend);
        assert_eq!(d.topic, "Revision + Practice");
    }

    #[test]
    fn themed_month_weekday_topic() {
        let d = day(29);
        assert!(!d.is_weekend);
        assert_eq!(d.month, 2);
        assert_eq!(d.topic, "Statistics + Power BI - Day 1");
        assert_eq!(day(56 - 3).topic, "Statistics + Power BI - Day 25");
        assert_eq!(day(141).topic, "RAG + Capstone + Interview - Day 1");
    }

    #[test]
    fn themed_month_weekend_overrides() {
        assert_eq!(day(34).topic, "Weekly Project / GitHub");
        assert_eq!(day(35).topic, "Revision / Quiz");
        assert_eq!(day(168).topic, "Revision / Quiz");
        assert_eq!(day(167).topic, "Weekly Project / GitHub");
    }

    #[test]
    fn every_themed_weekend_is_overridden() {
        for d in generate_roadmap().into_iter().filter(|d| d.month > 1) {
            match weekend_slot(d.day_number) {
                Some(WeekendSlot::Sixth) => assert_eq!(d.topic, WEEKLY_PROJECT_TOPIC),
                Some(WeekendSlot::Seventh) => assert_eq!(d.topic, WEEKLY_REVISION_TOPIC),
                None => assert!(d.topic.contains(" - Day "), "day {}", d.day_number),
            }
        }
    }

    #[test]
    fn weekend_slot_uses_absolute_day() {
        assert_eq!(weekend_slot(29), None);
        assert_eq!(weekend_slot(34), Some(WeekendSlot::Sixth));
        assert_eq!(weekend_slot(35), Some(WeekendSlot::Seventh));
    }
}
