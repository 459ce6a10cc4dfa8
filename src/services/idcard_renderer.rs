use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::DateTime;
use printpdf::{
    image_crate, BuiltinFont, Color, Image, ImageTransform, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rgb,
};

use crate::errors::internal::RenderError;
use crate::types::db::{contractor, employee};

// CR80 badge size
const CARD_WIDTH_MM: f32 = 85.6;
const CARD_HEIGHT_MM: f32 = 54.0;

const RENDER_DPI: f32 = 300.0;

/// Everything the renderer needs to draw one card. Paths are absolute;
/// the caller resolves them against the upload root.
pub struct CardData<'a> {
    pub employee: &'a employee::Model,
    pub contractor: &'a contractor::Model,
    pub photo_path: PathBuf,
    pub system_signature_path: PathBuf,
    pub issued_at: i64,
    pub valid_till: i64,
}

/// Renders employee ID cards as single-page PDFs at CR80 badge size.
///
/// Rendering is all-or-nothing: a missing photo or signature fails the
/// whole render rather than producing a card with holes in it.
pub struct IdCardRenderer {
    company_name: String,
    company_address: String,
    logo_path: PathBuf,
}

impl IdCardRenderer {
    pub fn new(company_name: String, company_address: String, logo_path: PathBuf) -> Self {
        Self {
            company_name,
            company_address,
            logo_path,
        }
    }

    /// Draw the card and write it to `output`
    pub fn render(&self, card: &CardData<'_>, output: &Path) -> Result<(), RenderError> {
        let employee = card.employee;

        let (doc, page, layer) = PdfDocument::new(
            "Contractor Employee ID Card",
            Mm(CARD_WIDTH_MM),
            Mm(CARD_HEIGHT_MM),
            "card",
        );
        let layer = doc.get_page(page).get_layer(layer);

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        draw_border(&layer);

        // Header: logo is optional, company text is not
        if let Some(logo) = load_optional_image(&self.logo_path)? {
            place_image(&layer, logo, Mm(3.0), Mm(44.0), Mm(9.0));
        }
        layer.set_fill_color(Color::Rgb(Rgb::new(0.05, 0.15, 0.45, None)));
        layer.use_text(&self.company_name, 9.0, Mm(14.0), Mm(49.0), &font_bold);
        layer.use_text(&self.company_address, 5.0, Mm(14.0), Mm(45.5), &font);

        // Photo on the right
        let photo = load_required_image("photo", &card.photo_path)?;
        place_image(&layer, photo, Mm(64.0), Mm(20.5), Mm(18.0));

        // Identity block on the left
        layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        let full_name = display_name(employee);
        layer.use_text(&full_name, 8.0, Mm(4.0), Mm(38.5), &font_bold);

        let mut y = 33.5;
        let mut field = |label: &str, value: &str| {
            layer.use_text(label, 5.0, Mm(4.0), Mm(y), &font_bold);
            layer.use_text(value, 5.0, Mm(24.0), Mm(y), &font);
            y -= 3.6;
        };

        field("Contractor", &card.contractor.contractor_name);
        field("Department", &card.contractor.department);
        if let Some(dob) = &employee.dob {
            field("Date of Birth", dob);
        }
        if let Some(mobile) = &employee.mobile {
            field("Mobile", mobile);
        }
        if let Some(address) = &employee.address_present {
            field("Address", address);
        }
        if let Some(joined) = employee.hr_approved_at {
            field("Date of Joining", &format_date(joined));
        }
        field("Issued", &format_date(card.issued_at));
        field("Valid Till", &format_date(card.valid_till));

        // Authorisation signature bottom-right
        let signature = load_required_image("signature", &card.system_signature_path)?;
        place_image(&layer, signature, Mm(62.0), Mm(8.5), Mm(20.0));
        layer.use_text("Authorised Signatory", 4.5, Mm(62.0), Mm(5.0), &font);

        let file = File::create(output)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        Ok(())
    }
}

fn display_name(employee: &employee::Model) -> String {
    match &employee.middle_name {
        Some(middle) if !middle.is_empty() => {
            format!("{} {} {}", employee.first_name, middle, employee.surname)
        }
        _ => format!("{} {}", employee.first_name, employee.surname),
    }
}

fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%d-%m-%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn draw_border(layer: &PdfLayerReference) {
    let inset = 1.5;
    let points = vec![
        (Point::new(Mm(inset), Mm(inset)), false),
        (Point::new(Mm(CARD_WIDTH_MM - inset), Mm(inset)), false),
        (
            Point::new(Mm(CARD_WIDTH_MM - inset), Mm(CARD_HEIGHT_MM - inset)),
            false,
        ),
        (Point::new(Mm(inset), Mm(CARD_HEIGHT_MM - inset)), false),
    ];
    layer.set_outline_color(Color::Rgb(Rgb::new(0.05, 0.15, 0.45, None)));
    layer.set_outline_thickness(1.0);
    layer.add_line(Line {
        points,
        is_closed: true,
    });
}

fn load_required_image(kind: &str, path: &Path) -> Result<Image, RenderError> {
    if !path.is_file() {
        return Err(RenderError::asset_missing(kind, path.display().to_string()));
    }
    let decoded = image_crate::open(path).map_err(|e| {
        RenderError::image_decode(kind, path.display().to_string(), e.to_string())
    })?;
    // Strip alpha; PDF image XObjects want plain RGB
    Ok(Image::from_dynamic_image(&image_crate::DynamicImage::ImageRgb8(decoded.to_rgb8())))
}

fn load_optional_image(path: &Path) -> Result<Option<Image>, RenderError> {
    if !path.is_file() {
        return Ok(None);
    }
    load_required_image("logo", path).map(Some)
}

/// Place an image with its top-left corner near (x, y), scaled to the
/// target width while keeping aspect ratio
fn place_image(layer: &PdfLayerReference, image: Image, x: Mm, y: Mm, target_width: Mm) {
    let width_px = image.image.width.0 as f32;
    let natural_width_mm = width_px * 25.4 / RENDER_DPI;
    let scale = if natural_width_mm > 0.0 {
        target_width.0 / natural_width_mm
    } else {
        1.0
    };

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(x),
            translate_y: Some(y),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(RENDER_DPI),
            ..Default::default()
        },
    );
}
