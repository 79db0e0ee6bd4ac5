// perfdoc - Benchmark Performance Report Generator
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The closed set of benchmarked implementation variants.
//!
//! Report layout (table columns, chart series, narrative paragraphs) is
//! driven by the fixed declaration order of [`Variant::ALL`], so the set is
//! an enum rather than an open mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One implementation strategy being benchmarked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Reference implementation every other variant is compared against.
    Baseline,
    /// Explicit AVX2 SIMD intrinsics.
    Avx2,
    /// Manually unrolled inner loop.
    Unroll,
    /// Swapped loop nesting order.
    Interchange,
}

impl Variant {
    /// Number of variants.
    pub const COUNT: usize = 4;

    /// Number of non-baseline variants.
    pub const OPTIMIZED_COUNT: usize = Self::COUNT - 1;

    /// All variants in canonical declaration order, baseline first.
    pub const ALL: [Variant; Self::COUNT] = [
        Variant::Baseline,
        Variant::Avx2,
        Variant::Unroll,
        Variant::Interchange,
    ];

    /// Non-baseline variants in declaration order.
    pub const OPTIMIZED: [Variant; Self::OPTIMIZED_COUNT] =
        [Variant::Avx2, Variant::Unroll, Variant::Interchange];

    /// Canonical identifier used in input files and exports.
    pub fn id(self) -> &'static str {
        match self {
            Variant::Baseline => "baseline",
            Variant::Avx2 => "avx2",
            Variant::Unroll => "unroll",
            Variant::Interchange => "interchange",
        }
    }

    /// Human-readable label for table headers and chart legends.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Baseline => "Baseline",
            Variant::Avx2 => "AVX2",
            Variant::Unroll => "Unroll",
            Variant::Interchange => "Interchange",
        }
    }

    /// Short description of the technique, used in the overview chapter.
    pub fn description(self) -> &'static str {
        match self {
            Variant::Baseline => "Straightforward row-major implementation compiled with -O3.",
            Variant::Avx2 => {
                "AVX2 SIMD: leverages data parallelism by explicitly using AVX2 intrinsics to \
                 process several elements per instruction."
            }
            Variant::Unroll => {
                "Loop Unrolling: reduces loop overhead by manually processing several elements \
                 per inner-loop iteration."
            }
            Variant::Interchange => {
                "Loop Interchange: swaps the inner and outer loops to expose the impact of the \
                 memory access pattern on cache performance."
            }
        }
    }

    /// Position of this variant in [`Variant::ALL`].
    pub fn index(self) -> usize {
        match self {
            Variant::Baseline => 0,
            Variant::Avx2 => 1,
            Variant::Unroll => 2,
            Variant::Interchange => 3,
        }
    }

    /// Position of this variant in [`Variant::OPTIMIZED`], `None` for the baseline.
    pub fn optimized_index(self) -> Option<usize> {
        self.index().checked_sub(1)
    }

    /// Returns true for the baseline variant.
    pub fn is_baseline(self) -> bool {
        self == Variant::Baseline
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown variant '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order() {
        assert_eq!(Variant::ALL[0], Variant::Baseline);
        for (i, v) in Variant::ALL.iter().enumerate() {
            assert_eq!(v.index(), i);
        }
        for (i, v) in Variant::OPTIMIZED.iter().enumerate() {
            assert_eq!(v.optimized_index(), Some(i));
        }
        assert_eq!(Variant::Baseline.optimized_index(), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("AVX2".parse::<Variant>(), Ok(Variant::Avx2));
        assert_eq!(" interchange ".parse::<Variant>(), Ok(Variant::Interchange));
        assert!("sse".parse::<Variant>().is_err());
    }

    #[test]
    fn test_serde_ids() {
        let json = serde_json::to_string(&Variant::Unroll).unwrap();
        assert_eq!(json, "\"unroll\"");
        let back: Variant = serde_json::from_str("\"baseline\"").unwrap();
        assert_eq!(back, Variant::Baseline);
    }
}
