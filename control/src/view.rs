//! Rendering of the user interface in logical pixel coordinates.
//!
//! Drawing happens through the [`Surface`] trait, so this module never
//! touches the display driver. The display loop loads the published frame
//! and hands it over here together with its surface implementation.

use core::fmt::Write;

use heapless::String;

use crate::bank::Format;
use crate::catalog;
use crate::frame::{Frame, ParamView, ScopeFrame};
use crate::mapping;
use crate::selector::RomMap;
use crate::store::Mode;
use crate::ADC_MAX_VALUE;

/// The opaque monochrome drawing target.
///
/// Coordinates follow the display convention: x grows right, y grows down,
/// text is anchored at its top-left corner. The firmware implements this
/// for the OLED; tests implement it with a recorder.
pub trait Surface {
    fn clear(&mut self);
    fn draw_title(&mut self, x: i32, y: i32, text: &str);
    fn draw_str(&mut self, x: i32, y: i32, text: &str);
    fn draw_frame(&mut self, x: i32, y: i32, width: u32, height: u32);
    fn draw_box(&mut self, x: i32, y: i32, width: u32, height: u32);
    fn draw_hline(&mut self, x: i32, y: i32, length: u32);
    fn draw_vline(&mut self, x: i32, y: i32, length: u32);
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);
    fn draw_triangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32);
}

const ROW_HEIGHT: i32 = 16;
const BAR_WIDTH: i32 = 127;
const BAR_HEIGHT: i32 = 13;

// Geometry of the scope graticule.
const FRAME_LEFT: i32 = 26;
const FRAME_RIGHT: i32 = 127;
const FRAME_TOP: i32 = 9;
const FRAME_BOTTOM: i32 = 47;
const FRAME_CENTER: i32 = FRAME_TOP + ((FRAME_BOTTOM - FRAME_TOP) >> 1);
const CORNER_LEN: u32 = 4;

const VOLTS_PER_UNIT: f32 = 5.0 / 4095.0;

/// Draw the page the frame asks for. The caller flushes afterwards.
pub fn render(surface: &mut impl Surface, frame: &Frame, scope: &ScopeFrame) {
    surface.clear();
    match frame.mode {
        Mode::Presets => render_presets(surface, frame),
        Mode::Scope => render_scope(surface, scope),
        Mode::Settings => render_settings(surface, frame),
    }
}

fn render_presets(surface: &mut impl Surface, frame: &Frame) {
    let preset = usize::from(frame.preset) % catalog::PRESET_COUNT;
    let names = &catalog::PRESETS[preset];

    let mut title: String<20> = String::new();
    let _ = write!(
        title,
        "{}{}: {}",
        RomMap::of_preset(preset).letter(),
        preset % catalog::SELECT_COUNT,
        names.title,
    );
    surface.draw_title(0, 0, &title);

    for (slot, param) in frame.params.iter().enumerate() {
        render_param_row(
            surface,
            ROW_HEIGHT * (slot as i32 + 1),
            names.params[slot],
            param,
            frame.pots[slot],
            None,
        );
    }
}

fn render_settings(surface: &mut impl Surface, frame: &Frame) {
    surface.draw_title(0, 0, catalog::SETTINGS.title);

    for (slot, param) in frame.params.iter().enumerate() {
        let option = (param.format == Format::Named)
            .then(|| catalog::CV_MODE_NAMES[usize::from(param.value) % 3]);
        render_param_row(
            surface,
            ROW_HEIGHT * (slot as i32 + 1),
            catalog::SETTINGS.params[slot],
            param,
            frame.pots[slot],
            option,
        );
    }
}

/// One parameter row: a framed bar with its label, the stored value as the
/// fill, and the live pot position as a caret under the bar.
fn render_param_row(
    surface: &mut impl Surface,
    y: i32,
    label: &str,
    param: &ParamView,
    pot: u16,
    option: Option<&str>,
) {
    let mut text: String<20> = String::new();
    match param.format {
        Format::Plain => {
            let _ = write!(text, "{label}");
        }
        Format::Numeric => {
            let _ = write!(text, "{label}:{:03}", param.value);
        }
        Format::Named => {
            let _ = write!(text, "{label}:{}", option.unwrap_or(""));
        }
    }

    surface.draw_frame(0, y, BAR_WIDTH as u32, BAR_HEIGHT as u32);
    surface.draw_str(2, y, &text);

    let fill = mapping::map(
        i32::from(param.value),
        i32::from(param.min),
        i32::from(param.max),
        1,
        BAR_WIDTH - 1,
    )
    .clamp(1, BAR_WIDTH - 1);
    if fill > 1 {
        surface.draw_box(1, y + 1, fill as u32, (BAR_HEIGHT - 2) as u32);
    }

    let caret = mapping::map(i32::from(pot), 0, i32::from(ADC_MAX_VALUE), 1, BAR_WIDTH - 2);
    let base = y + BAR_HEIGHT;
    surface.draw_triangle(caret, base - 1, caret + 4, base + 3, caret - 4, base + 3);
    surface.draw_vline(caret, y + 1, (BAR_HEIGHT - 2) as u32);
}

fn render_scope(surface: &mut impl Surface, scope: &ScopeFrame) {
    render_graticule(surface);
    render_scope_labels(surface, scope);
    render_waveform(surface, scope);
}

fn render_graticule(surface: &mut impl Surface) {
    surface.draw_vline(FRAME_LEFT, FRAME_TOP, CORNER_LEN);
    surface.draw_vline(FRAME_LEFT, FRAME_BOTTOM - CORNER_LEN as i32, CORNER_LEN);
    surface.draw_vline(FRAME_RIGHT, FRAME_TOP, CORNER_LEN);
    surface.draw_vline(FRAME_RIGHT, FRAME_BOTTOM - CORNER_LEN as i32, CORNER_LEN);

    surface.draw_hline(FRAME_LEFT + 1, FRAME_TOP, CORNER_LEN);
    surface.draw_hline(FRAME_LEFT + 1, FRAME_BOTTOM - 1, CORNER_LEN);
    surface.draw_hline(FRAME_RIGHT - CORNER_LEN as i32, FRAME_TOP, CORNER_LEN);
    surface.draw_hline(FRAME_RIGHT - CORNER_LEN as i32, FRAME_BOTTOM - 1, CORNER_LEN);

    let mut x = FRAME_LEFT;
    while x <= FRAME_RIGHT {
        surface.draw_hline(x, FRAME_CENTER, 2);
        x += 8;
    }

    // Tick marking where the trigger-aligned waveform starts.
    surface.draw_vline(FRAME_LEFT + 10, FRAME_CENTER - 2, 4);
}

fn render_scope_labels(surface: &mut impl Surface, scope: &ScopeFrame) {
    let mut text: String<10> = String::new();
    let _ = write!(text, "{}", scope.scan_delay);
    surface.draw_str(0, 0, &text);

    draw_volts(surface, 105, 0, scope.average);
    draw_volts(surface, 0, FRAME_TOP, scope.range_max);
    draw_volts(
        surface,
        0,
        FRAME_CENTER - 4,
        (scope.range_max + scope.range_min) >> 1,
    );
    draw_volts(surface, 0, FRAME_BOTTOM - 8, scope.range_min);
}

fn draw_volts(surface: &mut impl Surface, x: i32, y: i32, raw: u16) {
    let mut text: String<10> = String::new();
    let _ = write!(text, "{:.2}", f32::from(raw) * VOLTS_PER_UNIT);
    surface.draw_str(x, y, &text);
}

fn render_waveform(surface: &mut impl Surface, scope: &ScopeFrame) {
    let last = scope.samples.len() - 1;
    let mut x = 0;
    while x < scope.draw_len {
        // Offset into the buffer so the triggering edge always lands on
        // the same screen position.
        let index = (x + scope.trigger).saturating_sub(10).min(last);
        let previous = index.saturating_sub(1);
        let y0 = sample_to_y(scope, scope.samples[previous]);
        let y1 = sample_to_y(scope, scope.samples[index]);
        surface.draw_line(x as i32 + 27, y0, x as i32 + 28, y1);
        x += 2;
    }
}

fn sample_to_y(scope: &ScopeFrame, sample: u16) -> i32 {
    mapping::map(
        i32::from(sample),
        i32::from(scope.range_min),
        i32::from(scope.range_max),
        FRAME_BOTTOM - 1,
        FRAME_TOP + 1,
    )
    .clamp(FRAME_TOP + 1, FRAME_BOTTOM - 1)
}
