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

use crate::config::ExportOptions;
use crate::error::Error;

/// Per-entry value pipeline: scale, then threshold clamp, then time scale.
///
/// The steps always run in that order.
#[derive(Debug, Clone, Copy)]
pub struct ValueTransform<'a> {
    scale: f64,
    threshold: Option<f64>,
    time_scale: Option<&'a [f64]>,
}

impl<'a> ValueTransform<'a> {
    pub fn new(options: &'a ExportOptions) -> Self {
        Self {
            scale: options.scale(),
            threshold: options.threshold(),
            time_scale: options.time_scale(),
        }
    }

    /// Transforms a value contributed by `spot`.
    ///
    /// With a threshold the result is `max(value * scale - 2 * threshold, 0)`.
    /// The time scale is looked up per spot in either layout.
    pub fn apply(&self, value: f64, spot: u32) -> Result<f64, Error> {
        let mut value = value * self.scale;
        if let Some(threshold) = self.threshold {
            value = (value - 2.0 * threshold).max(0.0);
        }
        if let Some(time_scale) = self.time_scale {
            let Some(divisor) = time_scale.get(spot as usize) else {
                return Err(Error::bounds_violation(
                    "time_scale spot",
                    spot as u64,
                    time_scale.len() as u64,
                ));
            };
            value /= divisor;
        }
        Ok(value)
    }
}
