//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use scorebook::{
    cli::{BallCmd, Commands, PlayerCmd, Scorebook, TeamCmd, TopCmd, TournamentCmd},
    commands::{
        ball::{handle_ingest, handle_record},
        common::CommandContext,
        export::handle_export,
        leaderboard::{handle_top_batsmen, handle_top_bowlers},
        matches::handle_matches,
        result::handle_result,
        schedule::handle_schedule,
        score::handle_score,
        standings::handle_standings,
        team::{handle_add_player, handle_add_team, handle_remove_team},
        tournament,
    },
    storage::{DeliveryInput, MatchResultInput},
};

/// Run the CLI.
fn main() -> anyhow::Result<()> {
    sensible_env_logger::init!();

    let app = Scorebook::parse();
    let mut ctx = CommandContext::new()?;

    match app.command {
        Commands::Tournament { cmd } => match cmd {
            TournamentCmd::Create { name } => tournament::handle_create(&mut ctx, &name)?,
            TournamentCmd::List => tournament::handle_list(&mut ctx)?,
        },

        Commands::Team { cmd } => match cmd {
            TeamCmd::Add {
                tournament_id,
                name,
                players,
                logo,
            } => handle_add_team(
                &mut ctx,
                tournament_id,
                &name,
                players.as_deref(),
                logo.as_deref(),
            )?,
            TeamCmd::Remove { team_id } => handle_remove_team(&mut ctx, team_id)?,
        },

        Commands::Player { cmd } => match cmd {
            PlayerCmd::Add { team_id, name } => handle_add_player(&mut ctx, team_id, &name)?,
        },

        Commands::Schedule {
            tournament_id,
            matches_per_team,
        } => handle_schedule(&mut ctx, tournament_id, matches_per_team)?,

        Commands::Matches { tournament_id } => handle_matches(&mut ctx, tournament_id)?,

        Commands::MatchResult {
            match_id,
            a_runs,
            a_overs,
            a_wickets,
            b_runs,
            b_overs,
            b_wickets,
            player_stats,
        } => handle_result(
            &mut ctx,
            match_id,
            MatchResultInput {
                a_runs,
                a_overs,
                a_wickets,
                b_runs,
                b_overs,
                b_wickets,
            },
            player_stats.as_deref(),
        )?,

        Commands::Ball { cmd } => match cmd {
            BallCmd::Record {
                match_id,
                payload,
                over,
                ball_in_over,
                batting_team,
                bowling_team,
                striker,
                non_striker,
                bowler,
                runs,
                extras,
                wicket,
                wicket_type,
            } => handle_record(
                &mut ctx,
                match_id,
                payload.as_deref(),
                DeliveryInput {
                    over,
                    ball_in_over,
                    batting_team_id: batting_team,
                    bowling_team_id: bowling_team,
                    striker_id: striker,
                    non_striker_id: non_striker,
                    bowler_id: bowler,
                    runs,
                    extras,
                    wicket,
                    wicket_type,
                },
            )?,
            BallCmd::Ingest { match_id, payload } => {
                handle_ingest(&mut ctx, match_id, &payload)?
            }
        },

        Commands::Score { match_id, json } => handle_score(&mut ctx, match_id, json)?,

        Commands::Standings {
            tournament_id,
            json,
        } => handle_standings(&mut ctx, tournament_id, json)?,

        Commands::Top { cmd } => match cmd {
            TopCmd::Batsmen {
                team_id,
                limit,
                from_deliveries,
                json,
            } => handle_top_batsmen(&mut ctx, team_id, limit, from_deliveries, json)?,
            TopCmd::Bowlers {
                team_id,
                limit,
                from_deliveries,
                json,
            } => handle_top_bowlers(&mut ctx, team_id, limit, from_deliveries, json)?,
        },

        Commands::Export { tournament_id, out } => {
            handle_export(&mut ctx, tournament_id, out.as_deref())?
        }
    }

    Ok(())
}
