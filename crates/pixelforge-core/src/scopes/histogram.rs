//! RGB histogram computation, peak detection and chart rendering.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::image::{Channel, Image, Pixel};

/// Number of intensity buckets per channel.
pub const BINS: usize = 256;

/// Lowest bucket considered by peak detection. Buckets at or below 10 are
/// skipped so clipped shadows do not dominate.
const PEAK_FIRST_BIN: usize = 11;
/// Highest bucket considered by peak detection (values ≥ 246 are skipped).
const PEAK_LAST_BIN: usize = 245;

/// Side length of the rendered chart.
const CHART_SIZE: u32 = 256;
/// Spacing of the chart's background grid.
const GRID_STEP: u32 = 32;
const GRID_COLOR: Pixel = Pixel::gray(220);

/// Per-channel intensity counts for R, G and B.
///
/// Every channel holds exactly [`BINS`] counts and `max_count` is the largest
/// of them. Deserialization rejects data that breaks either rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHistogramData")]
pub struct HistogramData {
    bins: [Vec<u32>; 3],
    max_count: u32,
}

#[derive(Deserialize)]
struct RawHistogramData {
    bins: [Vec<u32>; 3],
    max_count: u32,
}

impl TryFrom<RawHistogramData> for HistogramData {
    type Error = EngineError;

    fn try_from(raw: RawHistogramData) -> Result<Self> {
        for (channel, counts) in Channel::ALL.iter().zip(&raw.bins) {
            if counts.len() != BINS {
                return Err(EngineError::invalid(format!(
                    "histogram {channel} channel has {} bins, expected {BINS}",
                    counts.len()
                )));
            }
        }
        let max_count = largest_count(&raw.bins);
        if raw.max_count != max_count {
            return Err(EngineError::invalid(format!(
                "histogram max_count is {} but the largest bin holds {max_count}",
                raw.max_count
            )));
        }
        Ok(Self {
            bins: raw.bins,
            max_count,
        })
    }
}

fn largest_count(bins: &[Vec<u32>; 3]) -> u32 {
    bins.iter()
        .flat_map(|b| b.iter().copied())
        .max()
        .unwrap_or(0)
}

impl HistogramData {
    /// Count every pixel's R, G and B intensity.
    pub fn compute(image: &Image) -> Self {
        let mut bins = [vec![0u32; BINS], vec![0u32; BINS], vec![0u32; BINS]];
        for px in image.pixels() {
            for (bin, v) in bins.iter_mut().zip(px.to_array()) {
                bin[v as usize] += 1;
            }
        }
        let max_count = largest_count(&bins);
        Self { bins, max_count }
    }

    /// Largest bin count across all channels.
    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Counts for one channel.
    pub fn channel(&self, channel: Channel) -> &[u32] {
        &self.bins[channel.index()]
    }

    /// Most frequent intensity of `channel` within buckets 11..=245.
    ///
    /// Ties go to the lowest bucket. A channel with no samples in that range
    /// reports bucket 11.
    pub fn peak(&self, channel: Channel) -> u8 {
        let counts = self.channel(channel);
        let mut best = PEAK_FIRST_BIN;
        for i in PEAK_FIRST_BIN + 1..=PEAK_LAST_BIN {
            if counts[i] > counts[best] {
                best = i;
            }
        }
        best as u8
    }

    /// Peaks of all channels in R, G, B order.
    pub fn peaks(&self) -> [u8; 3] {
        Channel::ALL.map(|c| self.peak(c))
    }

    /// Render a 256×256 line chart of the three channels.
    ///
    /// White background with a light grid; each channel is a polyline in its
    /// pure color through `(i, 255 − count·255 / max_count)`.
    pub fn render(&self) -> Image {
        let mut canvas = vec![Pixel::WHITE; (CHART_SIZE * CHART_SIZE) as usize];
        for y in 0..CHART_SIZE {
            for x in 0..CHART_SIZE {
                if x % GRID_STEP == 0 || y % GRID_STEP == 0 {
                    canvas[(y * CHART_SIZE + x) as usize] = GRID_COLOR;
                }
            }
        }

        let colors = [
            Pixel::rgb(255, 0, 0),
            Pixel::rgb(0, 255, 0),
            Pixel::rgb(0, 0, 255),
        ];
        for (counts, color) in self.bins.iter().zip(colors) {
            let heights: Vec<i64> = counts.iter().map(|&c| self.chart_row(c)).collect();
            for i in 1..BINS {
                draw_line(
                    &mut canvas,
                    (i as i64 - 1, heights[i - 1]),
                    (i as i64, heights[i]),
                    color,
                );
            }
        }

        // Buffer length is CHART_SIZE² by construction.
        Image::from_fn(CHART_SIZE, CHART_SIZE, |x, y| {
            canvas[(y * CHART_SIZE + x) as usize]
        })
    }

    fn chart_row(&self, count: u32) -> i64 {
        let top = (CHART_SIZE - 1) as i64;
        if self.max_count == 0 {
            return top;
        }
        top - (count as u64 * top as u64 / self.max_count as u64) as i64
    }
}

/// Compute and render the histogram chart of `image`.
pub fn histogram(image: &Image) -> Image {
    tracing::debug!(width = image.width(), height = image.height(), "histogram");
    HistogramData::compute(image).render()
}

/// Bresenham line between two in-bounds chart points.
fn draw_line(canvas: &mut [Pixel], from: (i64, i64), to: (i64, i64), color: Pixel) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    let size = CHART_SIZE as i64;

    loop {
        if (0..size).contains(&x) && (0..size).contains(&y) {
            canvas[(y * size + x) as usize] = color;
        }
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_pixel_count() {
        let img = Image::from_fn(4, 5, |x, y| Pixel::rgb(x as u8, y as u8, 200));
        let hist = HistogramData::compute(&img);
        for c in Channel::ALL {
            assert_eq!(hist.channel(c).iter().sum::<u32>(), 20);
        }
        assert_eq!(hist.channel(Channel::Blue)[200], 20);
        assert_eq!(hist.max_count(), 20);
    }

    #[test]
    fn test_peak_ignores_clipped_buckets() {
        // Lots of black and white, fewer midtones.
        let mut pixels = vec![Pixel::gray(0); 10];
        pixels.extend(vec![Pixel::gray(255); 10]);
        pixels.extend(vec![Pixel::rgb(100, 60, 30); 3]);
        pixels.push(Pixel::rgb(10, 246, 11));
        let img = Image::from_pixels(24, 1, pixels).unwrap();
        let hist = HistogramData::compute(&img);
        assert_eq!(hist.peaks(), [100, 60, 30]);
    }

    #[test]
    fn test_peak_search_bounds_are_11_and_245() {
        // Buckets 10 and 246 dominate but sit just outside the search range.
        let mut pixels = vec![Pixel::rgb(10, 246, 10); 5];
        pixels.push(Pixel::rgb(11, 245, 245));
        let img = Image::from_pixels(6, 1, pixels).unwrap();
        let hist = HistogramData::compute(&img);
        assert_eq!(hist.peak(Channel::Red), 11);
        assert_eq!(hist.peak(Channel::Green), 245);
        assert_eq!(hist.peak(Channel::Blue), 245);
    }

    #[test]
    fn test_deserialize_rejects_short_bins() {
        let res = serde_json::from_str::<HistogramData>(r#"{"bins":[[1,2],[3],[]],"max_count":3}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_deserialize_rejects_wrong_max_count() {
        let img = Image::from_fn(2, 2, |_, _| Pixel::gray(40));
        let mut json = serde_json::to_value(HistogramData::compute(&img)).unwrap();
        json["max_count"] = 1.into();
        assert!(serde_json::from_value::<HistogramData>(json).is_err());
    }

    #[test]
    fn test_serde_roundtrip_keeps_counts() {
        let img = Image::from_fn(3, 2, |x, y| Pixel::rgb(x as u8 * 20, y as u8 * 90, 33));
        let hist = HistogramData::compute(&img);
        let back: HistogramData =
            serde_json::from_str(&serde_json::to_string(&hist).unwrap()).unwrap();
        assert_eq!(back, hist);
        assert_eq!(back.render(), hist.render());
    }

    #[test]
    fn test_peak_ties_go_to_lowest_bucket() {
        let img = Image::from_pixels(2, 1, vec![Pixel::gray(90), Pixel::gray(40)]).unwrap();
        assert_eq!(HistogramData::compute(&img).peak(Channel::Green), 40);
    }

    #[test]
    fn test_peak_without_in_range_samples() {
        let img = Image::from_fn(3, 3, |_, _| Pixel::gray(5));
        assert_eq!(HistogramData::compute(&img).peaks(), [11, 11, 11]);
    }

    #[test]
    fn test_render_is_chart_sized() {
        let img = Image::from_fn(8, 8, |x, _| Pixel::rgb(x as u8 * 30, 128, 0));
        let chart = histogram(&img);
        assert_eq!(chart.dimensions(), (256, 256));
    }

    #[test]
    fn test_render_places_peak_at_top() {
        let img = Image::from_fn(4, 4, |_, _| Pixel::rgb(100, 0, 0));
        let chart = HistogramData::compute(&img).render();
        // Red peaks at bucket 100; green and blue peak at bucket 0.
        assert_eq!(chart.at(100, 0), Pixel::rgb(255, 0, 0));
        assert_eq!(chart.at(0, 0), Pixel::rgb(0, 0, 255));
        // Baseline away from any peak is drawn by the last channel.
        assert_eq!(chart.at(200, 255), Pixel::rgb(0, 0, 255));
    }

    #[test]
    fn test_render_empty_image_draws_baselines() {
        let chart = histogram(&Image::new(0, 0));
        assert_eq!(chart.at(17, 255), Pixel::rgb(0, 0, 255));
        assert_eq!(chart.at(17, 100), Pixel::WHITE);
    }
}
