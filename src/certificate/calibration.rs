use crate::certificate::layout::{Field, FieldLayout, FontFamily};
use crate::certificate::metrics::TextMeasure;
use crate::certificate::overlay::{Color, Overlay};
use strum::IntoEnumIterator;

/// Abstand der Gitterlinien in Punkt
pub const GRID_STEP: u32 = 50;
/// Jede zweite Gitterlinie wird beschriftet
pub const LABEL_STEP: u32 = 100;

const TITLE: &str = "COORDINATE MAPPING OVERLAY";
const REFERENCE_ROWS: [u32; 7] = [400, 350, 300, 250, 200, 150, 100];

/// Koordinatengitter zum Einmessen der Feldpositionen.
///
/// Zeichnet ein 50pt-Raster mit Beschriftung alle 100pt, Mittellinien,
/// Eckmarken, Referenzzeilen sowie die Ankerpunkte des aktuellen Layouts.
pub fn coordinate_overlay(
    width: f32,
    height: f32,
    layout: &FieldLayout,
    measure: &dyn TextMeasure,
) -> Overlay {
    let mut overlay = Overlay::new(width, height);

    for x in grid_positions(width) {
        let xf = x as f32;
        overlay.draw_line((xf, 0.0), (xf, height), 0.5, Color::RED);
        if x % LABEL_STEP == 0 {
            overlay.draw_text(
                &x.to_string(),
                xf + 2.0,
                height - 20.0,
                FontFamily::Helvetica,
                8.0,
                Color::RED,
            );
        }
    }
    for y in grid_positions(height) {
        let yf = y as f32;
        overlay.draw_line((0.0, yf), (width, yf), 0.5, Color::RED);
        if y % LABEL_STEP == 0 {
            overlay.draw_text(
                &y.to_string(),
                5.0,
                yf + 2.0,
                FontFamily::Helvetica,
                8.0,
                Color::RED,
            );
        }
    }

    let (cx, cy) = (width / 2.0, height / 2.0);
    overlay.draw_line((cx, 0.0), (cx, height), 2.0, Color::BLUE);
    overlay.draw_line((0.0, cy), (width, cy), 2.0, Color::BLUE);
    overlay.draw_dot((cx, cy), 5.0, Color::BLUE);
    overlay.draw_text(
        &format!("CENTER: ({}, {})", cx as i32, cy as i32),
        cx + 10.0,
        cy + 10.0,
        FontFamily::HelveticaBold,
        12.0,
        Color::BLUE,
    );

    let (w, h) = (width as i32, height as i32);
    let corners = [
        ((10.0, 10.0), (5.0, 5.0), "(0, 0)".to_string()),
        ((10.0, height - 25.0), (5.0, height - 5.0), format!("(0, {})", h)),
        ((width - 80.0, 10.0), (width - 5.0, 5.0), format!("({}, 0)", w)),
        (
            (width - 120.0, height - 25.0),
            (width - 5.0, height - 5.0),
            format!("({}, {})", w, h),
        ),
    ];
    for ((lx, ly), dot, label) in corners {
        overlay.draw_text(&label, lx, ly, FontFamily::HelveticaBold, 10.0, Color::GREEN);
        overlay.draw_dot(dot, 3.0, Color::GREEN);
    }

    for y in REFERENCE_ROWS {
        let yf = y as f32;
        let label = format!("Y={}", y);
        let label_width = measure.text_width(&label, FontFamily::Helvetica, 12.0);
        overlay.draw_text(
            &label,
            cx - label_width / 2.0,
            yf,
            FontFamily::Helvetica,
            12.0,
            Color::BLACK,
        );
        overlay.draw_dot((cx, yf - 5.0), 2.0, Color::RED);
    }

    // Anker der Felder: Punkt auf der Grundlinie, Name und Koordinaten daneben
    for field in Field::iter() {
        let position = layout.get(field);
        overlay.draw_dot((position.x, position.y), 3.0, Color::GREEN);
        overlay.draw_text(
            &format!("{} ({}, {})", field, position.x, position.y),
            position.x + 6.0,
            position.y + 4.0,
            FontFamily::Helvetica,
            8.0,
            Color::GREEN,
        );
    }

    let title_width = measure.text_width(TITLE, FontFamily::HelveticaBold, 16.0);
    overlay.draw_text(
        TITLE,
        cx - title_width / 2.0,
        height - 50.0,
        FontFamily::HelveticaBold,
        16.0,
        Color::RED,
    );

    overlay
}

/// 0, 50, 100, ... unterhalb von `extent`
fn grid_positions(extent: f32) -> impl Iterator<Item = u32> {
    let limit = extent.max(0.0) as u32;
    (0..limit).step_by(GRID_STEP as usize)
}
