use crate::infra::{kickoff_timestamp, sample_buyer, sample_sellers};
use chrono::{Local, NaiveDate, Utc};
use clap::Args;
use dealbridge::error::AppError;
use dealbridge::marketplace::acquisition::domain::Assignee;
use dealbridge::marketplace::acquisition::{AcquisitionProcess, AcquisitionStore, ProcessBlueprint};
use dealbridge::marketplace::matching::{
    compatibility_score, CompatibilityScore, Match, MatchBoard, MatchId, Message, MessageKind,
};
use dealbridge::marketplace::profiles::{BuyerProfile, PartySide, SellerProfile};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Deal kickoff date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) kickoff: Option<NaiveDate>,
    /// Include the seeded task listing in the pipeline output.
    #[arg(long)]
    pub(crate) list_tasks: bool,
    /// Skip the deal-room messaging portion of the demo.
    #[arg(long)]
    pub(crate) skip_messaging: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct MatchScoreArgs {
    /// Only print sellers at or above this compatibility total.
    #[arg(long, default_value_t = 0)]
    pub(crate) min_score: u8,
}

pub(crate) fn run_match_scores(args: MatchScoreArgs) -> Result<(), AppError> {
    let buyer = sample_buyer();
    let sellers = sample_sellers();

    println!(
        "Compatibility scores for {} {} ({})",
        buyer.first_name, buyer.last_name, buyer.company.name
    );
    for seller in &sellers {
        let score = compatibility_score(&buyer.preferences, &seller.listing());
        if score.total < args.min_score {
            continue;
        }
        render_score(seller, &score);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        kickoff,
        list_tasks,
        skip_messaging,
    } = args;

    let kickoff = kickoff_timestamp(kickoff.unwrap_or_else(|| Local::now().date_naive()));
    let now = Utc::now();
    let buyer = sample_buyer();
    let sellers = sample_sellers();

    println!("Acquisition marketplace demo");
    println!(
        "Buyer: {} {} ({})",
        buyer.first_name, buyer.last_name, buyer.company.name
    );

    let mut board = MatchBoard::new();
    let mut best: Option<(MatchId, u8, &SellerProfile)> = None;
    for (index, seller) in sellers.iter().enumerate() {
        let score = compatibility_score(&buyer.preferences, &seller.listing());
        render_score(seller, &score);

        let id = MatchId(format!("match-{:06}", index + 1));
        board.add_match(Match::proposed(
            id.clone(),
            buyer.id.clone(),
            seller.id.clone(),
            PartySide::Seller,
            score.total,
            now,
        ));

        let beats_best = best
            .as_ref()
            .map(|(_, total, _)| score.total > *total)
            .unwrap_or(true);
        if beats_best {
            best = Some((id, score.total, seller));
        }
    }

    let Some((match_id, total, seller)) = best else {
        println!("No sellers available to match against");
        return Ok(());
    };

    println!(
        "\nAccepting the strongest match: {} ({} points)",
        seller.business.name, total
    );
    board.accept(&match_id, now)?;
    println!(
        "Match board: {} pending, {} accepted",
        board.pending().len(),
        board.accepted().len()
    );

    if !skip_messaging {
        run_messaging(&mut board, &match_id, &buyer, seller)?;
    }

    println!("\nAcquisition pipeline");
    let mut store = AcquisitionStore::new();
    let process = AcquisitionProcess::from_blueprint(
        match_id,
        &buyer.id,
        &seller.id,
        &ProcessBlueprint::standard(),
        kickoff,
        now,
    );
    let process_id = process.id.clone();
    let first_step = process.steps[0].id.clone();
    store.add_process(process);

    let updated = store.complete_step(&process_id, &first_step, now)?;
    println!(
        "Process {} -> step {}/{} ({}% complete)",
        updated.id,
        updated.current_step,
        updated.total_steps,
        updated.progress_percent()
    );
    for step in &updated.steps {
        let due_note = match step.due_date {
            Some(date) => format!(" | due {}", date.date_naive()),
            None => String::new(),
        };
        println!(
            "- {} | {}{}",
            step.title,
            step.status.label(),
            due_note
        );
    }

    if list_tasks {
        println!("\nSeeded task breakdown");
        for step in &updated.steps {
            for task in &step.tasks {
                let assignee = match &task.assigned_to {
                    Assignee::Both => "both parties".to_string(),
                    Assignee::Participant(id) => id.to_string(),
                };
                let due_note = match task.due_date {
                    Some(date) => format!(" | due {}", date.date_naive()),
                    None => String::new(),
                };
                println!(
                    "- {} | {} | {} | {}{}",
                    step.title,
                    task.title,
                    task.priority.label(),
                    assignee,
                    due_note
                );
            }
        }
    }

    Ok(())
}

fn run_messaging(
    board: &mut MatchBoard,
    match_id: &MatchId,
    buyer: &BuyerProfile,
    seller: &SellerProfile,
) -> Result<(), AppError> {
    println!("\nDeal room messaging");
    let sent_at = Utc::now();
    board.add_message(
        match_id,
        Message {
            id: "msg-000001".to_string(),
            sender: buyer.id.clone(),
            content: format!(
                "Hi {}, we reviewed {} and would like to start diligence.",
                seller.first_name, seller.business.name
            ),
            kind: MessageKind::Text,
            sent_at,
            read: false,
        },
    )?;
    board.add_message(
        match_id,
        Message {
            id: "msg-000002".to_string(),
            sender: seller.id.clone(),
            content: "Great news. Our NDA draft is attached.".to_string(),
            kind: MessageKind::Text,
            sent_at,
            read: false,
        },
    )?;

    let entry = board
        .get(match_id)
        .ok_or_else(|| AppError::Matching(
            dealbridge::marketplace::matching::MatchError::NotFound(match_id.clone()),
        ))?;
    println!(
        "- {} messages exchanged, {} unread for the buyer",
        entry.messages.len(),
        entry.unread_count(&buyer.id)
    );

    board.mark_messages_read(match_id, &buyer.id)?;
    let entry = board
        .get(match_id)
        .ok_or_else(|| AppError::Matching(
            dealbridge::marketplace::matching::MatchError::NotFound(match_id.clone()),
        ))?;
    println!(
        "- after reading: {} unread for the buyer",
        entry.unread_count(&buyer.id)
    );

    Ok(())
}

fn render_score(seller: &SellerProfile, score: &CompatibilityScore) {
    println!(
        "\n{} ({}, {}) -> {} points",
        seller.business.name, seller.business.industry, seller.location.state, score.total
    );
    for component in &score.components {
        println!(
            "  - {}: {} ({})",
            component.factor.label(),
            component.points,
            component.notes
        );
    }
}
