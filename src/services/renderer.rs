//! 试卷 PDF 渲染
//!
//! 按行扫描拼装好的试卷文本，逐行分类后写入分页的 A4 文档。
//! 只负责生成 PDF 字节，写盘是单独一步。

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use crate::error::RenderError;
use crate::models::exam::ExamSpec;

// ========== 版面常量 ==========

/// A4 页宽（毫米）
const PAGE_WIDTH_MM: f64 = 210.0;
/// A4 页高（毫米）
const PAGE_HEIGHT_MM: f64 = 297.0;
/// 左右页边距（毫米）
const SIDE_MARGIN_MM: f64 = 10.0;
/// 顶部页边距（毫米）
const TOP_MARGIN_MM: f64 = 10.0;
/// 自动分页保留的底部边距（毫米）
const BOTTOM_MARGIN_MM: f64 = 20.0;

/// 试卷标题字号
const TITLE_FONT_SIZE: f64 = 16.0;
/// SECTION 标题字号
const SECTION_FONT_SIZE: f64 = 13.0;
/// "Instructions:" 标签字号
const LABEL_FONT_SIZE: f64 = 12.0;
/// 正文字号
const BODY_FONT_SIZE: f64 = 11.0;

/// 试卷标题行高（毫米）
const TITLE_ROW_MM: f64 = 10.0;
/// 标签与 SECTION 标题行高（毫米）
const HEADER_ROW_MM: f64 = 8.0;
/// 正文行高（毫米）
const BODY_ROW_MM: f64 = 7.0;

/// 磅到毫米的换算系数
const PT_TO_MM: f64 = 0.352_778;
/// 估算用的平均字符宽度（字号的一半）
const CHAR_WIDTH_RATIO: f64 = 0.5;

/// 字体来源
#[derive(Debug, Clone, Default)]
pub enum FontSource {
    /// 内置 Helvetica / Helvetica-Bold
    #[default]
    Builtin,
    /// 自定义 TTF 字体（常规 + 粗体）
    ///
    /// 文件缺失或无法解析时渲染直接失败，不回退到内置字体。
    Custom { regular: PathBuf, bold: PathBuf },
}

impl FontSource {
    /// 从配置的字体路径构造
    ///
    /// 两个路径都提供时使用自定义字体，都缺省时使用内置字体，
    /// 只提供其中一个视为配置不完整。
    pub fn from_config(
        regular: Option<PathBuf>,
        bold: Option<PathBuf>,
    ) -> Result<Self, RenderError> {
        match (regular, bold) {
            (Some(regular), Some(bold)) => Ok(FontSource::Custom { regular, bold }),
            (None, None) => Ok(FontSource::Builtin),
            (Some(path), None) | (None, Some(path)) => Err(RenderError::FontLoadFailed {
                path: path.display().to_string(),
                message: "字体配置不完整，font_regular 与 font_bold 必须同时提供".to_string(),
            }),
        }
    }
}

/// 文本行的渲染类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// 空行，只产生竖向间距
    Blank,
    /// SECTION 标题行
    SectionHeading,
    /// "Answer any ..." 选做说明行
    AnswerLine,
    /// 普通正文行
    Body,
}

/// 判断一行文本（已去除首尾空白）的渲染类别
pub fn classify_line(line: &str) -> LineKind {
    if line.is_empty() {
        LineKind::Blank
    } else if line.to_uppercase().starts_with("SECTION") {
        LineKind::SectionHeading
    } else if line.to_lowercase().starts_with("answer") {
        LineKind::AnswerLine
    } else {
        LineKind::Body
    }
}

/// 渲染完整试卷，返回 PDF 文件字节
///
/// 页面结构：居中标题、总分与时长行、分隔线、可选的考试说明，
/// 然后逐行渲染试卷正文。空间不足时自动换页。
pub fn render_paper_pdf(
    spec: &ExamSpec,
    content: &str,
    fonts: &FontSource,
) -> Result<Vec<u8>, RenderError> {
    let (doc, page, layer) = PdfDocument::new(
        spec.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let (regular, bold) = load_fonts(&doc, fonts)?;

    {
        let mut writer = PageWriter::new(&doc, doc.get_page(page).get_layer(layer));

        // ===== 页眉 =====
        writer.write_centered_line(&spec.title, &bold, TITLE_FONT_SIZE, TITLE_ROW_MM);
        writer.advance(2.0);
        writer.write_meta_row(
            &format!("Total Marks: {}", spec.total_marks),
            &format!("Time: {}", spec.duration),
            &regular,
        );
        writer.advance(4.0);
        writer.draw_divider();
        writer.advance(6.0);

        // ===== 考试说明 =====
        if !spec.instructions.is_empty() {
            writer.write_line("Instructions:", &bold, LABEL_FONT_SIZE, HEADER_ROW_MM);
            for line in spec.instructions.lines() {
                writer.write_wrapped(line, &regular, BODY_FONT_SIZE);
            }
            writer.advance(5.0);
        }

        // ===== 正文 =====
        for raw_line in content.split('\n') {
            let line = raw_line.trim();
            match classify_line(line) {
                LineKind::Blank => writer.advance(4.0),
                LineKind::SectionHeading => {
                    writer.advance(3.0);
                    writer.write_line(line, &bold, SECTION_FONT_SIZE, HEADER_ROW_MM);
                    writer.advance(2.0);
                }
                LineKind::AnswerLine | LineKind::Body => {
                    writer.write_wrapped(line, &regular, BODY_FONT_SIZE);
                    writer.advance(1.0);
                }
            }
        }
    }

    let mut buffer = BufWriter::new(Vec::new());
    doc.save(&mut buffer)
        .map_err(|e| RenderError::Backend(e.to_string()))?;
    buffer
        .into_inner()
        .map_err(|e| RenderError::Backend(e.to_string()))
}

/// 把渲染好的 PDF 字节写入文件
pub async fn save_pdf(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| RenderError::WriteFailed {
            path: path.display().to_string(),
            source: e,
        })
}

/// 加载正文与粗体两套字体
fn load_fonts(
    doc: &PdfDocumentReference,
    fonts: &FontSource,
) -> Result<(IndirectFontRef, IndirectFontRef), RenderError> {
    match fonts {
        FontSource::Builtin => {
            let regular = doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| RenderError::Backend(e.to_string()))?;
            let bold = doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| RenderError::Backend(e.to_string()))?;
            Ok((regular, bold))
        }
        FontSource::Custom { regular, bold } => Ok((
            load_external_font(doc, regular)?,
            load_external_font(doc, bold)?,
        )),
    }
}

/// 加载单个自定义字体文件
fn load_external_font(
    doc: &PdfDocumentReference,
    path: &Path,
) -> Result<IndirectFontRef, RenderError> {
    if !path.exists() {
        return Err(RenderError::FontNotFound {
            path: path.display().to_string(),
        });
    }
    let file = File::open(path).map_err(|e| RenderError::FontLoadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    doc.add_external_font(file)
        .map_err(|e| RenderError::FontLoadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

/// 自上而下的页面书写光标，空间不足时自动换页
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    /// 当前光标纵坐标（printpdf 坐标系，自页面底部算起）
    cursor_y: f64,
}

impl<'a> PageWriter<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            cursor_y: PAGE_HEIGHT_MM - TOP_MARGIN_MM,
        }
    }

    /// 光标下移
    fn advance(&mut self, mm: f64) {
        self.cursor_y -= mm;
    }

    /// 确保当前页还能放下 needed 毫米的内容，否则新起一页
    fn ensure_space(&mut self, needed_mm: f64) {
        if self.cursor_y - needed_mm < BOTTOM_MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor_y = PAGE_HEIGHT_MM - TOP_MARGIN_MM;
        }
    }

    /// 在左边距处写入一行
    fn write_line(&mut self, text: &str, font: &IndirectFontRef, size: f64, row_mm: f64) {
        self.ensure_space(row_mm);
        self.cursor_y -= row_mm;
        self.layer
            .use_text(text, size, Mm(SIDE_MARGIN_MM), Mm(self.cursor_y), font);
    }

    /// 居中写入一行
    fn write_centered_line(&mut self, text: &str, font: &IndirectFontRef, size: f64, row_mm: f64) {
        self.ensure_space(row_mm);
        self.cursor_y -= row_mm;
        let text_width = estimate_text_width(text, size);
        let x = ((PAGE_WIDTH_MM - text_width) / 2.0).max(SIDE_MARGIN_MM);
        self.layer.use_text(text, size, Mm(x), Mm(self.cursor_y), font);
    }

    /// 同一行内左右分列写入两段元信息
    fn write_meta_row(&mut self, left: &str, right: &str, font: &IndirectFontRef) {
        self.ensure_space(HEADER_ROW_MM);
        self.cursor_y -= HEADER_ROW_MM;
        self.layer.use_text(
            left,
            BODY_FONT_SIZE,
            Mm(SIDE_MARGIN_MM),
            Mm(self.cursor_y),
            font,
        );
        let right_width = estimate_text_width(right, BODY_FONT_SIZE);
        let x = (PAGE_WIDTH_MM - SIDE_MARGIN_MM - right_width).max(SIDE_MARGIN_MM);
        self.layer
            .use_text(right, BODY_FONT_SIZE, Mm(x), Mm(self.cursor_y), font);
    }

    /// 在当前光标处画一条通栏分隔线
    fn draw_divider(&mut self) {
        let divider = Line {
            points: vec![
                (Point::new(Mm(SIDE_MARGIN_MM), Mm(self.cursor_y)), false),
                (
                    Point::new(Mm(PAGE_WIDTH_MM - SIDE_MARGIN_MM), Mm(self.cursor_y)),
                    false,
                ),
            ],
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        };
        self.layer.set_outline_thickness(0.5);
        self.layer.add_shape(divider);
    }

    /// 写入自动换行的正文
    fn write_wrapped(&mut self, text: &str, font: &IndirectFontRef, size: f64) {
        for piece in wrap_line(text, max_chars_for(size)) {
            self.write_line(&piece, font, size, BODY_ROW_MM);
        }
    }
}

/// 估算一段文本的宽度（毫米）
fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * CHAR_WIDTH_RATIO * PT_TO_MM
}

/// 按估算字宽计算一行能容纳的字符数
fn max_chars_for(font_size: f64) -> usize {
    let usable = PAGE_WIDTH_MM - 2.0 * SIDE_MARGIN_MM;
    (usable / (font_size * CHAR_WIDTH_RATIO * PT_TO_MM)) as usize
}

/// 按词贪心换行，超长单词按字符硬切
fn wrap_line(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        // 超长单词：先结束当前行，再按字符硬切
        if word_chars > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut chunk = String::new();
            let mut chunk_chars = 0usize;
            for ch in word.chars() {
                if chunk_chars == max_chars {
                    lines.push(std::mem::take(&mut chunk));
                    chunk_chars = 0;
                }
                chunk.push(ch);
                chunk_chars += 1;
            }
            current = chunk;
            current_chars = chunk_chars;
            continue;
        }

        let needed = if current.is_empty() {
            word_chars
        } else {
            current_chars + 1 + word_chars
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exam::QuestionTypeConfig;

    fn sample_spec(instructions: &str) -> ExamSpec {
        ExamSpec {
            title: "Calculus Midterm".to_string(),
            duration: "90 minutes".to_string(),
            instructions: instructions.to_string(),
            total_marks: 50,
            optional_questions: false,
            types: QuestionTypeConfig {
                mcq: Some(5),
                short_answer: None,
                long_answer: None,
            },
        }
    }

    #[test]
    fn test_classify_blank_line() {
        assert_eq!(classify_line(""), LineKind::Blank);
    }

    #[test]
    fn test_classify_section_heading_ignores_case() {
        assert_eq!(classify_line("SECTION A – MCQ"), LineKind::SectionHeading);
        assert_eq!(classify_line("section b – Short"), LineKind::SectionHeading);
    }

    #[test]
    fn test_classify_answer_line_ignores_case() {
        assert_eq!(
            classify_line("Answer any 3 questions."),
            LineKind::AnswerLine
        );
        assert_eq!(classify_line("answer all parts"), LineKind::AnswerLine);
    }

    #[test]
    fn test_classify_question_as_body() {
        assert_eq!(
            classify_line("Q1. Evaluate the limit. (5 marks)"),
            LineKind::Body
        );
    }

    #[test]
    fn test_wrap_line_short_text_unchanged() {
        assert_eq!(wrap_line("short line", 40), vec!["short line"]);
    }

    #[test]
    fn test_wrap_line_breaks_on_word_boundaries() {
        let pieces = wrap_line("one two three four five", 9);
        assert_eq!(pieces, vec!["one two", "three", "four five"]);
        for piece in &pieces {
            assert!(piece.chars().count() <= 9);
        }
    }

    #[test]
    fn test_wrap_line_hard_splits_long_words() {
        let pieces = wrap_line("abcdefghij", 4);
        assert_eq!(pieces, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_line_flushes_pending_words_before_hard_split() {
        let pieces = wrap_line("ab cdefghij", 4);
        assert_eq!(pieces, vec!["ab", "cdef", "ghij"]);
    }

    #[test]
    fn test_wrap_line_empty_gives_single_empty_row() {
        assert_eq!(wrap_line("", 40), vec![""]);
    }

    #[test]
    fn test_font_source_requires_both_paths() {
        let result = FontSource::from_config(Some(PathBuf::from("reg.ttf")), None);
        assert!(matches!(result, Err(RenderError::FontLoadFailed { .. })));
    }

    #[test]
    fn test_missing_custom_font_fails_instead_of_falling_back() {
        let spec = sample_spec("");
        let fonts = FontSource::Custom {
            regular: PathBuf::from("no_such_font.ttf"),
            bold: PathBuf::from("no_such_font_bold.ttf"),
        };
        match render_paper_pdf(&spec, "\nSECTION A – MCQ\nQ1. x (5 marks)\n", &fonts) {
            Err(RenderError::FontNotFound { path }) => {
                assert!(path.contains("no_such_font.ttf"));
            }
            other => panic!("意外结果: {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn test_render_with_builtin_fonts_produces_pdf_bytes() {
        let spec = sample_spec("Attempt all questions.\nWrite clearly.");
        let content = "\nSECTION A – MCQ\nQ1. What is 2 + 2? (5 marks)\nQ2. Define a set. (5 marks)\n";
        let bytes = render_paper_pdf(&spec, content, &FontSource::Builtin).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_save_pdf_writes_bytes_to_disk() {
        let path = std::env::temp_dir().join("question_paper_gen_save_pdf_test.pdf");
        save_pdf(&path, b"%PDF-1.3 test bytes").await.unwrap();
        let written = tokio::fs::read(&path).await.unwrap();
        assert_eq!(written, b"%PDF-1.3 test bytes".to_vec());
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[test]
    fn test_render_long_paper_spans_pages() {
        let spec = sample_spec("");
        let mut content = String::from("\nSECTION A – MCQ\n");
        for i in 1..=120 {
            content.push_str(&format!(
                "Q{}. A fairly long question body that should wrap across the page width when rendered. ({} marks)\n",
                i, 5
            ));
        }
        let bytes = render_paper_pdf(&spec, &content, &FontSource::Builtin).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        // 120 道题不可能排进一页
        assert!(bytes.len() > 4096);
    }
}
