/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counter value calculated for a single report tick
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CounterMetric {
    /// Count since the counter was created
    pub total_count: u64,
    /// Count since the previous tick
    pub last_count: u64,
    /// Average rate per second since the counter was created
    pub mean_rate: f64,
    /// Rate per second since the previous tick
    pub last_rate: f64,
}

/// Single percentile of a histogram distribution
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Percentile {
    /// Quantile in range of `0.0..=100.0`
    pub quantile: f64,
    pub value: u64,
}

/// Histogram distribution calculated for a single report tick
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HistogramMetric {
    pub count: u64,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub percentiles: Vec<Percentile>,
}

/// Timer value: the call rate together with the latency distribution
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimerMetric {
    pub counter: CounterMetric,
    pub histogram: HistogramMetric,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "serde")]
    #[test]
    fn counter_metric_serializes_as_struct() {
        use serde_test::{assert_tokens, Token};

        assert_tokens(
            &CounterMetric {
                total_count: 10,
                last_count: 2,
                mean_rate: 1.5,
                last_rate: 0.5,
            },
            &[
                Token::Struct {
                    name: "CounterMetric",
                    len: 4,
                },
                Token::Str("total_count"),
                Token::U64(10),
                Token::Str("last_count"),
                Token::U64(2),
                Token::Str("mean_rate"),
                Token::F64(1.5),
                Token::Str("last_rate"),
                Token::F64(0.5),
                Token::StructEnd,
            ],
        );
    }
}
