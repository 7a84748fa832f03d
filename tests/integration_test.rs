use std::path::PathBuf;

use question_paper_gen::app::App;
use question_paper_gen::config::Config;
use question_paper_gen::error::{AppError, InputError};
use question_paper_gen::logger;
use question_paper_gen::models::{load_topics_from_csv, ExamSpec, QuestionTypeConfig, TopicSet};
use question_paper_gen::services::{
    assemble_paper, build_prompt, count_question_markers, plan_sections, render_paper_pdf,
    save_pdf, FontSource, LlmService,
};

/// 50 分、仅选择题（每题 5 分）的基准输入
fn midterm_spec() -> ExamSpec {
    ExamSpec {
        title: "Midterm Examination".to_string(),
        duration: "60 minutes".to_string(),
        instructions: "Answer all questions.".to_string(),
        total_marks: 50,
        optional_questions: false,
        types: QuestionTypeConfig {
            mcq: Some(5),
            short_answer: None,
            long_answer: None,
        },
    }
}

/// 构造一段符合出题格式的占位正文
fn fake_body(count: u32, marks: u32) -> String {
    (1..=count)
        .map(|i| format!("Q{}. Placeholder question text? ({} marks)", i, marks))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_plan_to_pdf_without_network() {
    // 校验输入
    let spec = midterm_spec();
    spec.validate().expect("输入校验失败");

    // 分数分配：50 分、每题 5 分，应得 10 道必答题
    let plans = plan_sections(&spec).expect("分数分配失败");
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].required_questions, 10);
    assert_eq!(plans[0].extra_questions, 0);

    // 提示词应带上题数与分值
    let prompt = build_prompt("MCQ", "Algebra", plans[0].total_questions(), 5);
    assert!(prompt.contains("Number of Questions: 10"));
    assert!(prompt.contains("(5 marks)"));

    // 拼装试卷
    let body = fake_body(plans[0].total_questions(), 5);
    let paper = assemble_paper(vec![(plans[0], body)]);
    let text = paper.to_text();
    assert!(text.contains("SECTION A – MCQ"), "应包含 SECTION 标题");
    assert!(!text.contains("Answer any"), "非选做模式不应出现选做说明");
    assert_eq!(count_question_markers(&text), 10);

    // 渲染 PDF
    let bytes = render_paper_pdf(&spec, &text, &FontSource::Builtin).expect("渲染 PDF 失败");
    assert!(bytes.starts_with(b"%PDF"), "输出应为 PDF 文件");
    println!("生成 PDF {} 字节", bytes.len());
}

#[test]
fn test_optional_paper_has_answer_any_lines() {
    // 三个题型 + 选做模式
    let mut spec = midterm_spec();
    spec.total_marks = 60;
    spec.optional_questions = true;
    spec.types = QuestionTypeConfig {
        mcq: Some(1),
        short_answer: Some(5),
        long_answer: Some(10),
    };
    spec.validate().expect("输入校验失败");

    // 三题型固定分配：选择 10 分、简答 20 分、论述拿剩余 30 分
    let plans = plan_sections(&spec).expect("分数分配失败");
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0].required_questions, 10);
    assert_eq!(plans[1].required_questions, 4);
    assert_eq!(plans[2].required_questions, 3);
    assert!(plans.iter().all(|p| p.extra_questions == 2));

    // 拼装试卷
    let pairs = plans
        .iter()
        .map(|p| (*p, fake_body(p.total_questions(), p.marks_per_question)))
        .collect();
    let paper = assemble_paper(pairs);
    let text = paper.to_text();
    assert!(text.contains("SECTION A – MCQ"));
    assert!(text.contains("SECTION B – Short Answer"));
    assert!(text.contains("SECTION C – Long Answer"));
    assert!(text.contains("Answer any 10 questions."));
    assert!(text.contains("Answer any 4 questions."));
    assert!(text.contains("Answer any 3 questions."));

    // 渲染 PDF
    let bytes = render_paper_pdf(&spec, &text, &FontSource::Builtin).expect("渲染 PDF 失败");
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_csv_topics_flow_into_prompt() {
    // 写入临时 CSV
    let csv_path = std::env::temp_dir().join("question_paper_gen_it_topics.csv");
    tokio::fs::write(&csv_path, "topic\nAlgebra\nGeometry\n")
        .await
        .expect("写入临时 CSV 失败");

    // 加载主题
    let topics = load_topics_from_csv(&csv_path).await.expect("加载主题失败");
    assert_eq!(topics.len(), 2);

    // 主题列表进入提示词
    let prompt = build_prompt("MCQ", &topics.joined(), 10, 1);
    assert!(prompt.contains("Topics: Algebra, Geometry"));

    let _ = tokio::fs::remove_file(&csv_path).await;
}

#[tokio::test]
async fn test_bad_input_halts_before_generation() {
    let config = Config {
        llm_api_key: "test-key".to_string(),
        ..Config::default()
    };
    let app = App::initialize(config);
    let output = std::env::temp_dir().join("question_paper_gen_it_halt.pdf");

    // 主题文件不存在：加载阶段直接报错
    let spec = midterm_spec();
    let result = app
        .run(&spec, &PathBuf::from("no_such_topics.csv"), &output)
        .await;
    assert!(matches!(
        result,
        Err(AppError::Input(InputError::TopicsFileNotFound { .. }))
    ));

    // 标题为空：校验阶段直接报错，不发起任何网络请求
    let csv_path = std::env::temp_dir().join("question_paper_gen_it_halt.csv");
    tokio::fs::write(&csv_path, "unit,topic\n1,Algebra\n")
        .await
        .expect("写入临时 CSV 失败");
    let mut spec = midterm_spec();
    spec.title = String::new();
    let result = app.run(&spec, &csv_path, &output).await;
    assert!(matches!(
        result,
        Err(AppError::Input(InputError::TitleMissing))
    ));

    // 空主题列表：库层入口同样拒绝，不会拼出没有主题的提示词
    let spec = midterm_spec();
    let result = app.generate(&spec, &TopicSet::new(Vec::new())).await;
    assert!(matches!(result, Err(AppError::Input(InputError::NoTopics))));

    let _ = tokio::fs::remove_file(&csv_path).await;
}

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_generate_paper_live() {
    // 初始化日志
    logger::init();

    // 加载配置（需要 GROQ_API_KEY）
    let config = Config::load(None).expect("加载配置失败");

    // 生成一节题目
    let service = LlmService::new(&config);
    let spec = midterm_spec();
    let plans = plan_sections(&spec).expect("分数分配失败");
    let prompt = build_prompt(
        plans[0].qtype.label(),
        "Algebra, Geometry, Trigonometry",
        plans[0].total_questions(),
        plans[0].marks_per_question,
    );
    let body = service.generate(&prompt).await.expect("调用 LLM 失败");
    println!("生成 {} 道题", count_question_markers(&body));

    // 拼装并渲染
    let paper = assemble_paper(vec![(plans[0], body)]);
    let bytes =
        render_paper_pdf(&spec, &paper.to_text(), &FontSource::Builtin).expect("渲染 PDF 失败");

    // 写入输出文件
    let output: PathBuf = std::env::temp_dir().join("Question_Paper_live_test.pdf");
    save_pdf(&output, &bytes).await.expect("写入 PDF 失败");
    println!("✅ 已写入 {}", output.display());
}
