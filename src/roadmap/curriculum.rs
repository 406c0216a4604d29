//! Fixed six-month curriculum. Content only; the layout rules live in
//! `generator`.

pub const DAYS_PER_MONTH: i32 = 28;
pub const TOTAL_DAYS: i32 = DAYS_PER_MONTH * 6;

/// Month 1 is scripted day by day.
pub const FOUNDATION_TOPICS: [&str; DAYS_PER_MONTH as usize] = [
    "Install Python, VS Code, Jupyter",
    "Variables, Data Types",
    "Operators, Type Conversion",
    "Conditionals",
    "Loops",
    "Update LinkedIn",
    "Revision + Practice",
    "Functions",
    "Lambda, map, filter",
    "Lists, Tuples",
    "Dict, Set",
    "File handling",
    "Upload to GitHub",
    "Revision",
    "NumPy basics",
    "Arrays",
    "Pandas basics",
    "Data cleaning",
    "Merging, grouping",
    "Upload notebook",
    "EDA practice",
    "RDBMS, ER diagrams",
    "SELECT",
    "GROUP BY",
    "JOINS",
    "Window functions",
    "SQL project",
    "Revision",
];

/// A themed month whose daily topics are synthesised from the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemedMonth {
    pub month: i32,
    pub first_day: i32,
    pub last_day: i32,
    pub theme: &'static str,
}

const fn themed(month: i32, theme: &'static str) -> ThemedMonth {
    ThemedMonth {
        month,
        first_day: (month - 1) * DAYS_PER_MONTH + 1,
        last_day: month * DAYS_PER_MONTH,
        theme,
    }
}

pub const THEMED_MONTHS: [ThemedMonth; 5] = [
    themed(2, "Statistics + Power BI"),
    themed(3, "Machine Learning"),
    themed(4, "Deep Learning + NLP"),
    themed(5, "GenAI + Streamlit + APIs"),
    themed(6, "RAG + Capstone + Interview"),
];

/// Topic for the sixth day of every week in a themed month.
pub const WEEKLY_PROJECT_TOPIC: &str = "Weekly Project / GitHub";
/// Topic for the seventh day of every week in a themed month.
pub const WEEKLY_REVISION_TOPIC: &str = "Revision / Quiz";
