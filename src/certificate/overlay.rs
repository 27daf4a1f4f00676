use crate::certificate::layout::{FieldPosition, FontFamily};
use crate::certificate::metrics::{encode_win_ansi, TextMeasure};
use lopdf::content::{Content, Operation};
use lopdf::Object;

/// Bézier-Faktor für Viertelkreise
const KAPPA: f32 = 0.552_284_8;

/// RGB-Farbe, Komponenten 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32);

impl Color {
    pub const BLACK: Color = Color(0.0, 0.0, 0.0);
    pub const RED: Color = Color(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color(0.0, 0.5, 0.0);
    pub const BLUE: Color = Color(0.0, 0.0, 1.0);

    fn operands(self) -> Vec<Object> {
        vec![self.0.into(), self.1.into(), self.2.into()]
    }
}

/// Ein Text auf der Ebene, linker Rand bereits berechnet
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub text: String,
    pub font: FontFamily,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub color: Color,
}

/// Linien und Markierungen, unter dem Text gezeichnet
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Color,
    },
    /// Gefüllter Kreis
    Dot {
        center: (f32, f32),
        radius: f32,
        color: Color,
    },
}

/// Transparente Ebene in Seitengröße, die über die Vorlage gelegt wird
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub width: f32,
    pub height: f32,
    placements: Vec<TextPlacement>,
    shapes: Vec<Shape>,
}

impl Overlay {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            placements: Vec::new(),
            shapes: Vec::new(),
        }
    }

    /// Zentriert `text` horizontal um `position.x`
    pub fn draw_centered(
        &mut self,
        text: &str,
        position: &FieldPosition,
        measure: &dyn TextMeasure,
    ) {
        let width = measure.text_width(text, position.font, position.size);
        self.draw_text(
            text,
            position.x - width / 2.0,
            position.y,
            position.font,
            position.size,
            Color::BLACK,
        );
    }

    /// Text mit linkem Rand bei `x`
    pub fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: FontFamily,
        size: f32,
        color: Color,
    ) {
        self.placements.push(TextPlacement {
            text: text.to_string(),
            font,
            size,
            x,
            y,
            color,
        });
    }

    pub fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        self.shapes.push(Shape::Line {
            from,
            to,
            width,
            color,
        });
    }

    pub fn draw_dot(&mut self, center: (f32, f32), radius: f32, color: Color) {
        self.shapes.push(Shape::Dot {
            center,
            radius,
            color,
        });
    }

    pub fn placements(&self) -> &[TextPlacement] {
        &self.placements
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Fonts in der Reihenfolge ihres ersten Auftretens
    pub fn fonts(&self) -> Vec<FontFamily> {
        let mut fonts = Vec::new();
        for p in &self.placements {
            if !fonts.contains(&p.font) {
                fonts.push(p.font);
            }
        }
        fonts
    }

    /// Content-Stream der Ebene, insgesamt in q/Q gekapselt
    pub fn content(&self) -> Content {
        let mut operations = vec![Operation::new("q", vec![])];

        for shape in &self.shapes {
            operations.extend(shape_operations(shape));
        }

        for p in &self.placements {
            operations.push(Operation::new("rg", p.color.operands()));
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(font_resource_name(p.font).into_bytes()), p.size.into()],
            ));
            operations.push(Operation::new("Td", vec![p.x.into(), p.y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_win_ansi(&p.text))],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        operations.push(Operation::new("Q", vec![]));
        Content { operations }
    }
}

fn shape_operations(shape: &Shape) -> Vec<Operation> {
    let mut ops = vec![Operation::new("q", vec![])];
    match *shape {
        Shape::Line {
            from,
            to,
            width,
            color,
        } => {
            ops.push(Operation::new("RG", color.operands()));
            ops.push(Operation::new("w", vec![width.into()]));
            ops.push(Operation::new("m", vec![from.0.into(), from.1.into()]));
            ops.push(Operation::new("l", vec![to.0.into(), to.1.into()]));
            ops.push(Operation::new("S", vec![]));
        }
        Shape::Dot {
            center: (cx, cy),
            radius: r,
            color,
        } => {
            let k = r * KAPPA;
            ops.push(Operation::new("rg", color.operands()));
            ops.push(Operation::new("m", vec![(cx + r).into(), cy.into()]));
            // vier Viertelkreise gegen den Uhrzeigersinn
            for [x1, y1, x2, y2, x3, y3] in [
                [cx + r, cy + k, cx + k, cy + r, cx, cy + r],
                [cx - k, cy + r, cx - r, cy + k, cx - r, cy],
                [cx - r, cy - k, cx - k, cy - r, cx, cy - r],
                [cx + k, cy - r, cx + r, cy - k, cx + r, cy],
            ] {
                ops.push(Operation::new(
                    "c",
                    vec![x1.into(), y1.into(), x2.into(), y2.into(), x3.into(), y3.into()],
                ));
            }
            ops.push(Operation::new("f", vec![]));
        }
    }
    ops.push(Operation::new("Q", vec![]));
    ops
}

/// Ressourcenname eines Fonts auf der Zielseite; eigenes Präfix,
/// damit vorhandene Fonts der Vorlage nicht überschrieben werden.
pub fn font_resource_name(font: FontFamily) -> String {
    format!("CertF{}", font as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Jedes Zeichen ist genau `size` Punkte breit
    struct FixedWidth;

    impl TextMeasure for FixedWidth {
        fn text_width(&self, text: &str, _font: FontFamily, size: f32) -> f32 {
            text.chars().count() as f32 * size
        }
    }

    fn operators(overlay: &Overlay) -> Vec<String> {
        overlay
            .content()
            .operations
            .iter()
            .map(|o| o.operator.clone())
            .collect()
    }

    #[test]
    fn test_centering_ascii() {
        let mut overlay = Overlay::new(792.0, 612.0);
        let pos = FieldPosition::new(500.0, 480.0, FontFamily::HelveticaBold, 10.0);
        overlay.draw_centered("Adan Lopez", &pos, &FixedWidth);

        let p = &overlay.placements()[0];
        // 10 Zeichen * 10pt = 100pt → linker Rand bei 500 - 50
        assert_eq!(p.x, 450.0);
        assert_eq!(p.y, 480.0);
        assert_eq!(p.color, Color::BLACK);
    }

    #[test]
    fn test_centering_accented() {
        let mut overlay = Overlay::new(792.0, 612.0);
        let pos = FieldPosition::new(380.0, 182.0, FontFamily::TimesItalic, 4.0);
        overlay.draw_centered("Zoë Núñez", &pos, &FixedWidth);

        // 9 Zeichen (nicht 12 Bytes) * 4pt = 36pt
        assert_eq!(overlay.placements()[0].x, 362.0);
    }

    #[test]
    fn test_fonts_deduplicated_in_order() {
        let mut overlay = Overlay::new(792.0, 612.0);
        let bold = FieldPosition::new(0.0, 0.0, FontFamily::HelveticaBold, 18.0);
        let plain = FieldPosition::new(0.0, 0.0, FontFamily::Helvetica, 12.0);
        overlay.draw_centered("a", &bold, &FixedWidth);
        overlay.draw_centered("b", &plain, &FixedWidth);
        overlay.draw_centered("c", &bold, &FixedWidth);

        assert_eq!(
            overlay.fonts(),
            vec![FontFamily::HelveticaBold, FontFamily::Helvetica]
        );
    }

    #[test]
    fn test_content_operations() {
        let mut overlay = Overlay::new(792.0, 612.0);
        let pos = FieldPosition::new(100.0, 50.0, FontFamily::Helvetica, 12.0);
        overlay.draw_centered("Hi", &pos, &FixedWidth);

        assert_eq!(
            operators(&overlay),
            vec!["q", "rg", "BT", "Tf", "Td", "Tj", "ET", "Q"]
        );

        let encoded = overlay.content().encode().unwrap();
        let text = String::from_utf8_lossy(&encoded);
        assert!(text.contains("(Hi) Tj"));
        assert!(text.contains(&format!("/{}", font_resource_name(FontFamily::Helvetica))));
    }

    #[test]
    fn test_shapes_drawn_before_text() {
        let mut overlay = Overlay::new(792.0, 612.0);
        overlay.draw_text("100", 102.0, 592.0, FontFamily::Helvetica, 8.0, Color::RED);
        overlay.draw_line((100.0, 0.0), (100.0, 612.0), 0.5, Color::RED);
        overlay.draw_dot((396.0, 306.0), 5.0, Color::BLUE);

        assert_eq!(overlay.shapes().len(), 2);
        assert_eq!(
            operators(&overlay),
            vec![
                "q", "q", "RG", "w", "m", "l", "S", "Q", "q", "rg", "m", "c", "c", "c", "c", "f",
                "Q", "rg", "BT", "Tf", "Td", "Tj", "ET", "Q",
            ]
        );
    }
}
