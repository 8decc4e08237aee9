//! Plain-text rendering of the view models.

use ui::vm::{
    AgentPanelVm, ChartRowVm, DashboardVm, FeedbackVm, LessonVm, NO_STRONG_TOPICS,
    NO_WEAK_TOPICS, ProgressVm, QuestionVm, RankedTopicVm, ResultsVm, RunOutputVm, StatCardVm,
    TopicCardVm,
};

const BAR_WIDTH: u32 = 30;

fn stat_line(card: &StatCardVm) {
    match card.out_of {
        Some((total, percent)) => println!(
            "  {:<18} {}{} / {} ({percent}%)",
            card.label, card.value, card.suffix, total
        ),
        None => println!("  {:<18} {}{}", card.label, card.value, card.suffix),
    }
}

fn topic_line(topic: &TopicCardVm) {
    println!(
        "  [{}] {} ({}, {})",
        topic.id, topic.name, topic.category, topic.difficulty.label
    );
    if !topic.description.is_empty() {
        println!("      {}", topic.description);
    }
}

pub fn topics(topics: &[TopicCardVm]) {
    if topics.is_empty() {
        println!("No topics available.");
    }
    for topic in topics {
        topic_line(topic);
    }
}

fn agents(panel: &AgentPanelVm) {
    println!(
        "AI Multi-Agent System: {} agents active, {} tasks coordinated, {} memories",
        panel.active_agents, panel.tasks_coordinated, panel.total_memory
    );
    for agent in &panel.agents {
        println!(
            "  {:<18} {:<8} {} memories",
            agent.name,
            agent.state.unwrap_or("-"),
            agent.memories
        );
    }
}

pub fn dashboard(vm: &DashboardVm) {
    println!("Your Progress");
    vm.stats.iter().for_each(stat_line);

    println!();
    println!("Topics");
    topics(&vm.topics);
    if vm.more_topics > 0 {
        println!("  ... and {} more", vm.more_topics);
    }

    if let Some(next) = &vm.recommendation {
        println!();
        println!("Recommended next");
        topic_line(next);
    }

    if !vm.study_tips.is_empty() {
        println!();
        println!("Study Tips");
        print!("{}", vm.study_tips);
    }

    if let Some(panel) = &vm.agents {
        println!();
        agents(panel);
    }
}

fn bar(row: &ChartRowVm) {
    let filled = row.knowledge * BAR_WIDTH / 100;
    println!(
        "  {:<18} {:<width$} {:>3}% {}",
        row.label,
        "#".repeat(filled as usize),
        row.knowledge,
        row.band.label(),
        width = BAR_WIDTH as usize
    );
}

fn ranked(title: &str, topics: &[RankedTopicVm], empty: &str) {
    println!("{title}");
    if topics.is_empty() {
        println!("  {empty}");
    }
    for topic in topics {
        println!("  {:<24} {:>3}%", topic.name, topic.level);
    }
}

pub fn progress(vm: &ProgressVm) {
    println!("Learning Progress");
    vm.stats.iter().for_each(stat_line);

    println!();
    println!("Knowledge by topic");
    if vm.chart.is_empty() {
        println!("  Start learning to see your progress");
    }
    vm.chart.iter().for_each(bar);

    println!();
    ranked("Topics Needing Focus", &vm.weak_topics, NO_WEAK_TOPICS);
    println!();
    ranked("Strong Topics", &vm.strong_topics, NO_STRONG_TOPICS);

    println!();
    println!("Recent Activity");
    if vm.timeline.is_empty() {
        println!("  No practice yet");
    }
    for entry in &vm.timeline {
        println!(
            "  {:<24} {:>3}%  {} practices  {}",
            entry.name,
            entry.knowledge,
            entry.practice_count,
            entry.last_practiced.as_deref().unwrap_or("-")
        );
    }
}

pub fn lesson(vm: &LessonVm) {
    println!("{}", vm.title);
    if let Some(difficulty) = &vm.difficulty {
        println!("Difficulty: {difficulty}  Knowledge: {}%", vm.knowledge);
    }
    println!();
    print!("{}", vm.body);
}

pub fn run_output(vm: &RunOutputVm) {
    let heading = if vm.is_error { "Error" } else { "Output" };
    println!("{heading} (attempt {}):", vm.attempts);
    println!("{}", vm.output);
}

pub fn question(vm: &QuestionVm) {
    println!();
    println!("{} ({}% through, {} answered)", vm.position, vm.progress, vm.answered);
    println!("{}", vm.question);
    for option in &vm.options {
        let marker = match (option.is_answer, option.selected) {
            (Some(true), _) => "+",
            (Some(false), true) => "x",
            (None, true) => ">",
            _ => " ",
        };
        println!(" {marker} {}. {}", option.letter, option.text);
    }
    match vm.feedback {
        FeedbackVm::Unanswered => {}
        FeedbackVm::Checking => println!("Checking your answer..."),
        FeedbackVm::Correct => println!("Correct!"),
        FeedbackVm::Incorrect => println!("Incorrect"),
    }
    if let Some(explanation) = &vm.explanation {
        println!("{explanation}");
    }
}

pub fn results(vm: &ResultsVm) {
    println!();
    println!("{} - {}", vm.topic_name, vm.grade.message);
    println!("{}", vm.summary_line);
    println!("{}%  Grade: {}", vm.score, vm.grade.letter);
    println!(
        "Correct: {}  Incorrect: {}  {}",
        vm.correct,
        vm.incorrect,
        if vm.passed { "Passed" } else { "Not passed" }
    );
    for review in &vm.review {
        let mark = if review.correct { "+" } else { "x" };
        println!();
        println!("{mark} {}. {}", review.number, review.question);
        println!(
            "    your answer: {}  correct: {}",
            review.your_answer, review.correct_answer
        );
        if !review.explanation.is_empty() {
            println!("    {}", review.explanation);
        }
    }
}
