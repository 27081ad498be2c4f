use super::Voucher;
use crate::colour::colours;
use crate::document::Document;
use crate::font::Font;
use crate::info::Info;
use crate::layout::*;
use crate::page::{Page, Shape, ShapeLayout, SpanFont};
use crate::units::Pt;
use crate::PDFError;
use chrono::{DateTime, FixedOffset};
use std::io::Write;
use std::time::Instant;

pub const TITLE: &str = "Voucher de Hospedagem";

/// Vertical space between stacked sections
pub const SECTION_GAP: Pt = Pt(12.0);
/// Space below the header
pub const HEADER_GAP: Pt = Pt(16.0);
pub const PRIMARY_INFO_MIN_HEIGHT: Pt = Pt(70.0);
/// Space between the guest list and the accommodation summary
pub const GUEST_SUMMARY_GAP: Pt = Pt(6.0);
/// Rule line plus two lines of small print
pub const FOOTER_HEIGHT: Pt = Pt(36.0);
const FOOTER_TEXT_GAP: Pt = Pt(8.0);

/// The steps a voucher is composed in, in order
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ComposeStep {
    Header,
    PrimaryInfo,
    GuestsAndAccommodation,
    HotelRestaurant,
    BillingNote,
    Contact,
    /// Only composed when the voucher has observations
    Observations,
    FooterPlacement,
    Footer,
    Close,
}

impl ComposeStep {
    /// The step that follows this one for the given voucher, [None] once closed
    pub fn next(self, voucher: &Voucher) -> Option<ComposeStep> {
        use ComposeStep::*;
        match self {
            Header => Some(PrimaryInfo),
            PrimaryInfo => Some(GuestsAndAccommodation),
            GuestsAndAccommodation => Some(HotelRestaurant),
            HotelRestaurant => Some(BillingNote),
            BillingNote => Some(Contact),
            Contact if voucher.observations().is_some() => Some(Observations),
            Contact | Observations => Some(FooterPlacement),
            FooterPlacement => Some(Footer),
            Footer => Some(Close),
            Close => None,
        }
    }
}

/// Where a step put its content. `top` is measured from the top of the page.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlacedSection {
    pub step: ComposeStep,
    pub page_index: usize,
    pub top: Pt,
    pub height: Pt,
}

/// A fully laid out voucher, ready to be written
pub struct ComposedVoucher {
    pub document: Document,
    pub placements: Vec<PlacedSection>,
}

impl ComposedVoucher {
    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    pub fn placement(&self, step: ComposeStep) -> Option<&PlacedSection> {
        self.placements.iter().find(|p| p.step == step)
    }

    pub fn write<W: Write>(self, w: W) -> Result<(), PDFError> {
        self.document.write(w)
    }
}

#[derive(Debug, Copy, Clone)]
struct Typography {
    title: SpanFont,
    subtitle: SpanFont,
    label: SpanFont,
    body: SpanFont,
    strong: SpanFont,
    small: SpanFont,
}

impl Typography {
    fn register(document: &mut Document) -> Typography {
        let regular = document.add_font(Font::helvetica());
        let bold = document.add_font(Font::helvetica_bold());
        let sized = |id, size| SpanFont { id, size: Pt(size) };
        Typography {
            title: sized(bold, 18.0),
            subtitle: sized(regular, 10.0),
            label: sized(bold, 11.0),
            body: sized(regular, 10.0),
            strong: sized(bold, 10.0),
            small: sized(regular, 8.0),
        }
    }
}

struct Composition {
    document: Document,
    pages: Vec<Page>,
    cursor: Cursor,
    typography: Typography,
    placements: Vec<PlacedSection>,
    overflow_reported: bool,
}

impl Composition {
    fn new(geometry: &PageGeometry) -> Composition {
        let mut document = Document::default();
        let typography = Typography::register(&mut document);
        Composition {
            document,
            pages: vec![geometry.new_page()],
            cursor: Cursor::new(geometry.clone()),
            typography,
            placements: Vec::new(),
            overflow_reported: false,
        }
    }

    fn current_page(&mut self) -> Result<&mut Page, PDFError> {
        let index = self.cursor.page_index;
        self.pages.get_mut(index).ok_or(PDFError::PageMissing(index))
    }

    fn draw_block(&mut self, block: &TextBlock, origin: (Pt, Pt), width: Pt) -> Result<Pt, PDFError> {
        let index = self.cursor.page_index;
        let page = self.pages.get_mut(index).ok_or(PDFError::PageMissing(index))?;
        block.draw(&self.document, page, origin, width)
    }

    fn draw_section(&mut self, section: &SectionBox, width: Pt) -> Result<Pt, PDFError> {
        let index = self.cursor.page_index;
        let page = self.pages.get_mut(index).ok_or(PDFError::PageMissing(index))?;
        section.draw(&self.document, page, self.cursor.position(), width)
    }

    fn draw_columns(
        &mut self,
        columns: &TwoColumnLayout,
        left: &SectionBox,
        right: &SectionBox,
    ) -> Result<Pt, PDFError> {
        let index = self.cursor.page_index;
        let page = self.pages.get_mut(index).ok_or(PDFError::PageMissing(index))?;
        columns.draw(&self.document, page, self.cursor.position(), left, right)
    }

    fn place(&mut self, step: ComposeStep, top: Pt, height: Pt) {
        log::debug!(
            "{step:?}: page {} y={} height={}",
            self.cursor.page_index + 1,
            top,
            height
        );
        self.placements.push(PlacedSection {
            step,
            page_index: self.cursor.page_index,
            top,
            height,
        });
    }

    fn report_overflow(&mut self) {
        if self.cursor.has_overflowed() && !self.overflow_reported {
            log::warn!(
                "voucher content runs {} past the bottom margin of page {}",
                -self.cursor.remaining_height(),
                self.cursor.page_index + 1
            );
            self.overflow_reported = true;
        }
    }

    fn close(mut self, info: Info) -> ComposedVoucher {
        for page in self.pages.drain(..) {
            self.document.add_page(page);
        }
        self.document.set_info(info);
        ComposedVoucher {
            document: self.document,
            placements: self.placements,
        }
    }
}

/// Lays a [Voucher] out section by section.
///
/// Every section is measured before it is drawn, drawn within the measured box,
/// and the cursor then advances by exactly the height that was drawn. The body is
/// expected to fit on one page; the footer moves to a page of its own if it would
/// otherwise collide with the body.
///
/// ```
/// use chrono::DateTime;
/// use voucher_pdf::voucher::{Voucher, VoucherComposer};
///
/// let voucher = Voucher {
///     empresa: "ACME".into(),
///     hospedes: vec!["Ana".into(), "Bruno".into()],
///     ..Default::default()
/// };
/// let now = DateTime::parse_from_rfc3339("2025-03-01T09:30:00-03:00").unwrap();
/// let composed = VoucherComposer::new(&voucher, now).compose().unwrap();
/// assert_eq!(composed.page_count(), 1);
/// ```
pub struct VoucherComposer<'v> {
    voucher: &'v Voucher,
    now: DateTime<FixedOffset>,
    geometry: PageGeometry,
    columns: TwoColumnLayout,
    section_style: SectionStyle,
    page_breaks: PageBreakPolicy,
}

impl<'v> VoucherComposer<'v> {
    /// `now` is the moment printed in the footer and recorded as the creation date
    pub fn new(voucher: &'v Voucher, now: DateTime<FixedOffset>) -> VoucherComposer<'v> {
        VoucherComposer {
            voucher,
            now,
            geometry: PageGeometry::default(),
            columns: TwoColumnLayout::default(),
            section_style: SectionStyle::default(),
            page_breaks: PageBreakPolicy::default(),
        }
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_columns(mut self, columns: TwoColumnLayout) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_section_style(mut self, style: SectionStyle) -> Self {
        self.section_style = style;
        self
    }

    pub fn with_page_breaks(mut self, policy: PageBreakPolicy) -> Self {
        self.page_breaks = policy;
        self
    }

    /// Width of full-width sections: a two-column row, or less on narrow pages
    fn content_width(&self) -> Pt {
        self.geometry
            .content_width()
            .min(self.columns.total_width())
            .max(Pt::ZERO)
    }

    fn fitted_columns(&self) -> TwoColumnLayout {
        self.columns.fit(self.content_width())
    }

    pub fn compose(&self) -> Result<ComposedVoucher, PDFError> {
        let mut composition = Composition::new(&self.geometry);
        let mut step = Some(ComposeStep::Header);

        while let Some(current) = step {
            if current == ComposeStep::Close {
                break;
            }
            self.run(current, &mut composition)?;
            step = current.next(self.voucher);
        }

        Ok(composition.close(self.info()))
    }

    fn run(&self, step: ComposeStep, state: &mut Composition) -> Result<(), PDFError> {
        use ComposeStep::*;
        let top = state.cursor.y;
        let t = state.typography;

        let (height, gap) = match step {
            Header => (self.header(state)?, HEADER_GAP),
            PrimaryInfo => {
                let section = self.primary_info_section(&t);
                (state.draw_section(&section, self.content_width())?, SECTION_GAP)
            }
            GuestsAndAccommodation => {
                let section = self.guests_section(&t);
                (state.draw_section(&section, self.content_width())?, SECTION_GAP)
            }
            HotelRestaurant => {
                let hotel = self.hotel_section(&t);
                let restaurant = self.restaurant_section(&t);
                (state.draw_columns(&self.fitted_columns(), &hotel, &restaurant)?, SECTION_GAP)
            }
            BillingNote => {
                let section = self.billing_section(&t);
                (state.draw_section(&section, self.content_width())?, SECTION_GAP)
            }
            Contact => {
                let section = self.contact_section(&t);
                (state.draw_section(&section, self.content_width())?, SECTION_GAP)
            }
            Observations => match self.observations_section(&t) {
                Some(section) => (state.draw_section(&section, self.content_width())?, SECTION_GAP),
                None => return Ok(()),
            },
            FooterPlacement => {
                let placement = self.page_breaks.place_footer(&mut state.cursor, FOOTER_HEIGHT);
                if placement.page_break {
                    state.pages.push(self.geometry.new_page());
                }
                state.place(step, placement.y, Pt::ZERO);
                return Ok(());
            }
            Footer => {
                let height = self.footer(state)?;
                state.place(step, top, height);
                state.cursor.advance(height);
                return Ok(());
            }
            Close => return Ok(()),
        };

        state.place(step, top, height);
        state.cursor.advance(height + gap);
        state.report_overflow();
        Ok(())
    }

    fn label(&self, t: &Typography, text: &str) -> TextBlock {
        TextBlock::new(text, t.label, colours::ACCENT)
    }

    fn line(&self, t: &Typography, text: String) -> TextBlock {
        TextBlock::new(text, t.body, colours::TEXT)
    }

    fn section(&self, t: &Typography, label: &str) -> SectionBox {
        SectionBox::labelled(self.label(t, label), self.section_style)
    }

    fn header(&self, state: &mut Composition) -> Result<Pt, PDFError> {
        let t = state.typography;
        let (x, y) = state.cursor.position();
        let width = self.content_width();

        let title = TextBlock::new(TITLE, t.title, colours::ACCENT).aligned(Align::Center);
        let mut height = state.draw_block(&title, (x, y), width)?;

        if let Some(id) = self.voucher.reference() {
            let reference = TextBlock::new(format!("Voucher Nº {id}"), t.subtitle, colours::MUTED)
                .aligned(Align::Center)
                .spaced(Pt(4.0));
            height += state.draw_block(&reference, (x, y + height), width)?;
        }

        Ok(height)
    }

    fn primary_info_section(&self, t: &Typography) -> SectionBox {
        let v = self.voucher;
        let mut section =
            SectionBox::new(self.section_style).with_min_height(PRIMARY_INFO_MIN_HEIGHT);
        section
            .push(self.line(t, format!("Empresa: {}", v.empresa)))
            .push(self.line(t, format!("Operação: {}", v.operacao)))
            .push(self.line(t, format!("Check-in: {}", v.checkin_display())))
            .push(self.line(t, format!("Check-out: {}", v.checkout_display())));
        section
    }

    fn guests_section(&self, t: &Typography) -> SectionBox {
        let v = self.voucher;
        let mut section = self.section(t, "Hóspedes");
        section
            .push(self.line(t, v.guest_list()))
            .push(
                TextBlock::new(v.acomodacoes.summary(), t.strong, colours::TEXT)
                    .spaced(GUEST_SUMMARY_GAP),
            );
        section
    }

    fn hotel_section(&self, t: &Typography) -> SectionBox {
        let v = self.voucher;
        let mut section = self.section(t, "Hotel");
        section
            .push(TextBlock::new(v.hotel_nome.clone(), t.strong, colours::TEXT))
            .push(self.line(t, v.hotel_endereco.clone()))
            .push(self.line(t, format!("Café da manhã: {}", v.hotel_cafe)))
            .push(self.line(t, format!("Lavanderia: {}", v.hotel_lavanderia)));
        section
    }

    fn restaurant_section(&self, t: &Typography) -> SectionBox {
        let v = self.voucher;
        let mut section = self.section(t, "Restaurante");
        section
            .push(TextBlock::new(v.restaurante_nome.clone(), t.strong, colours::TEXT))
            .push(self.line(t, format!("Horário: {}", v.restaurante_horario)))
            .push(self.line(t, v.restaurante_endereco.clone()));
        section
    }

    fn billing_section(&self, t: &Typography) -> SectionBox {
        let mut section = self.section(t, "Faturamento");
        section.push(self.line(t, self.voucher.billing_note()));
        section
    }

    fn contact_section(&self, t: &Typography) -> SectionBox {
        let v = self.voucher;
        let mut section = self.section(t, "Contato");
        section
            .push(self.line(t, format!("Responsável pela reserva: {}", v.responsavel_reserva)))
            .push(self.line(t, format!("Responsável operacional: {}", v.responsavel_operacional)))
            .push(self.line(t, format!("E-mail: {}", v.email_contato)))
            .push(self.line(t, format!("Telefone: {}", v.telefone_contato)));
        section
    }

    fn observations_section(&self, t: &Typography) -> Option<SectionBox> {
        let observations = self.voucher.observations()?;
        let mut section = self.section(t, "Observações");
        section.push(self.line(t, observations.to_string()));
        Some(section)
    }

    fn footer(&self, state: &mut Composition) -> Result<Pt, PDFError> {
        let t = state.typography;
        let (x, y) = state.cursor.position();
        let width = self.content_width();

        let page = state.current_page()?;
        let rule_y = page.height() - y;
        let rule_end = (x + width).min(page.content_box.x2);
        page.add_shape(ShapeLayout {
            shape: Shape::Line {
                from: (x, rule_y),
                to: (rule_end, rule_y),
            },
            fill: None,
            stroke: Some(colours::SECTION_BORDER),
            line_width: Pt(0.5),
        });

        let generated = TextBlock::new(
            self.now.format("Gerado em %d/%m/%Y às %H:%M").to_string(),
            t.small,
            colours::MUTED,
        )
        .spaced(FOOTER_TEXT_GAP);
        let used = state.draw_block(&generated, (x, y), width)?;

        let notice = TextBlock::new("Apresente este voucher no check-in.", t.small, colours::MUTED);
        state.draw_block(&notice, (x, y + used), width)?;

        Ok(FOOTER_HEIGHT)
    }

    fn info(&self) -> Info {
        let mut info = Info::new();
        info.title(TITLE).creation_date(self.now);
        if let Some(id) = self.voucher.reference() {
            info.subject(format!("Voucher Nº {id}"));
        }
        if !self.voucher.empresa.trim().is_empty() {
            info.author(self.voucher.empresa.trim());
        }
        info
    }
}

/// Renders a voucher as a PDF into `sink`.
///
/// The whole document is laid out and serialised in memory first, so nothing is
/// written to the sink if the voucher cannot be rendered. The same voucher rendered
/// with the same `now` always produces the same bytes.
pub fn render_voucher_pdf<W: Write>(
    voucher: &Voucher,
    mut sink: W,
    now: DateTime<FixedOffset>,
) -> Result<(), PDFError> {
    let started = Instant::now();
    let composed = VoucherComposer::new(voucher, now).compose()?;
    let pages = composed.page_count();

    let mut bytes: Vec<u8> = Vec::new();
    composed.write(&mut bytes)?;
    sink.write_all(&bytes)?;
    sink.flush()?;

    log::info!(
        "rendered voucher {}: {} page(s), {} bytes in {:?}",
        voucher.id.as_deref().unwrap_or("(no id)"),
        pages,
        bytes.len(),
        started.elapsed()
    );
    Ok(())
}
