//! Analytics figures
//!
//! Only the query count comes from the chat log; every other figure is a
//! fixed placeholder until the backend exposes real aggregates.

/// Day labels for the weekly trend chart
pub const TREND_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Figures shown on the analytics panel
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Messages in the chat log after the greeting
    pub total_queries: usize,
    /// Percentage of successful answers
    pub success_rate: u32,
    /// Average response time in seconds
    pub avg_response_time_secs: f32,
    /// Average answer confidence as a percentage
    pub avg_confidence: u32,
    /// Query count per category, in display order
    pub category_data: Vec<(String, u32)>,
    /// Queries per weekday, Monday first
    pub trend_data: [u32; 7],
}

impl Default for Metrics {
    fn default() -> Self {
        Self::placeholder(0)
    }
}

impl Metrics {
    /// Placeholder figures with the real query count
    pub fn placeholder(total_queries: usize) -> Self {
        Self {
            total_queries,
            success_rate: 85,
            avg_response_time_secs: 1.2,
            avg_confidence: 78,
            category_data: vec![
                ("Human Resources".to_string(), 35),
                ("Technology".to_string(), 28),
                ("Processes".to_string(), 20),
                ("Policies".to_string(), 12),
                ("General".to_string(), 5),
            ],
            trend_data: [10, 15, 12, 18, 22, 25, 20],
        }
    }

    /// The four counters as display strings, in panel order
    pub fn counters(&self) -> [(&'static str, String); 4] {
        [
            ("Total queries", self.total_queries.to_string()),
            ("Success rate", format!("{}%", self.success_rate)),
            ("Avg. response time", format!("{}s", self.avg_response_time_secs)),
            ("Avg. confidence", format!("{}%", self.avg_confidence)),
        ]
    }

    /// Largest category count, used to scale the histogram
    pub fn max_category(&self) -> u32 {
        self.category_data.iter().map(|(_, n)| *n).max().unwrap_or(0)
    }
}
