// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Shortest-round-trip float rendering.
//!
//! Output follows ECMAScript `Number.prototype.toString`: the shortest
//! decimal that re-parses to the same IEEE-754 value, switching to
//! exponent notation only outside the 1e-7..1e21 window and spelling
//! the exponent sign out (`1e+52`, not `1e52`). `f32` uses the
//! shortest-single threshold, `f64` the shortest-double one.

use std::io::{self, Write};

/// Write a finite `f32`.
pub fn write_f32<W: Write>(out: &mut W, value: f32) -> io::Result<()> {
    debug_assert!(value.is_finite());
    let mut buffer = ryu_js::Buffer::new();
    out.write_all(buffer.format_finite(value).as_bytes())
}

/// Write a finite `f64`.
pub fn write_f64<W: Write>(out: &mut W, value: f64) -> io::Result<()> {
    debug_assert!(value.is_finite());
    let mut buffer = ryu_js::Buffer::new();
    out.write_all(buffer.format_finite(value).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_f32(value: f32) -> String {
        let mut out = Vec::new();
        write_f32(&mut out, value).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn format_f64(value: f64) -> String {
        let mut out = Vec::new();
        write_f64(&mut out, value).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_f64_plain_decimal() {
        assert_eq!(format_f64(0.0), "0");
        assert_eq!(format_f64(-0.0), "0");
        assert_eq!(format_f64(3.0), "3");
        assert_eq!(format_f64(0.1), "0.1");
        assert_eq!(format_f64(-556132.25), "-556132.25");
        assert_eq!(format_f64(0.12314), "0.12314");
    }

    #[test]
    fn test_f64_exponent_notation() {
        // ECMAScript keeps integer notation up to 1e21 and spells the
        // exponent sign out beyond it
        assert_eq!(format_f64(1e20), "100000000000000000000");
        assert_eq!(format_f64(1e21), "1e+21");
        assert_eq!(format_f64(1e52), "1e+52");
        assert_eq!(format_f64(1e308), "1e+308");
        assert_eq!(format_f64(1e-7), "1e-7");
    }

    #[test]
    fn test_f32_shortest_single() {
        assert_eq!(format_f32(0.12314), "0.12314");
        // 9999999999999999999f32 rounds to exactly 1e19
        assert_eq!(format_f32(9999999999999999999.0), "10000000000000000000");
        assert_eq!(format_f32(3.400001), "3.400001");
    }

    #[test]
    fn test_f64_round_trips() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let mut checked = 0;
        while checked < 1000 {
            let value = f64::from_bits(rng.gen::<u64>());
            if !value.is_finite() {
                continue;
            }
            let text = format_f64(value);
            assert_eq!(text.parse::<f64>().unwrap(), value, "text {:?}", text);
            checked += 1;
        }
    }

    #[test]
    fn test_f32_round_trips() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let mut checked = 0;
        while checked < 1000 {
            let value = f32::from_bits(rng.gen::<u32>());
            if !value.is_finite() {
                continue;
            }
            let text = format_f32(value);
            assert_eq!(text.parse::<f32>().unwrap(), value, "text {:?}", text);
            checked += 1;
        }
    }
}
