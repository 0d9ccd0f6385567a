//! CLI tool for card type detection and checksum validation.
//!
//! # Usage
//!
//! ```bash
//! # Detect the card type (strict)
//! cardcheck classify 4111111111111111
//!
//! # Guess the type from a partial number
//! cardcheck classify 34 --suggest
//!
//! # Check digit only
//! cardcheck checksum "4111 1111 1111 1111"
//!
//! # Both, as JSON
//! cardcheck validate 4111111111111111 --output json
//!
//! # Generate test numbers
//! cardcheck generate --type amex --count 5
//! ```

use std::process::ExitCode;

use cardcheck::{format, generate, mask, CardType, Classifier, IssuerScan, ValidationError};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "cardcheck")]
#[command(author, version, about = "Payment card type detection and check digit validation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the card type of a number
    Classify {
        /// Card number (formatting characters are ignored)
        card_number: String,

        /// Match issuer prefixes only, for partially typed numbers
        #[arg(short, long)]
        suggest: bool,

        /// Also try Maestro and RuPay
        #[arg(short, long)]
        extended: bool,
    },

    /// Verify the check digit of a number
    Checksum {
        /// Card number (formatting characters are ignored)
        card_number: String,
    },

    /// Detect the card type and verify the check digit
    Validate {
        /// Card number (formatting characters are ignored)
        card_number: String,

        /// Also try Maestro and RuPay
        #[arg(short, long)]
        extended: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Group the digits of a number for display
    Format {
        /// Card number to format
        card_number: String,

        /// Separator between groups
        #[arg(short, long, default_value = " ")]
        separator: String,
    },

    /// Mask a number down to its last four digits
    Mask {
        /// Card number to mask
        card_number: String,
    },

    /// Generate test card numbers (for testing only)
    Generate {
        /// Card type to generate
        #[arg(short = 't', long = "type", default_value = "visa")]
        card_type: CardTypeArg,

        /// Number of cards to generate
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Output formatted (with spaces)
        #[arg(short, long)]
        formatted: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum CardTypeArg {
    Amex,
    Visa,
    Mastercard,
    Discover,
    Diners,
    Jcb,
    Maestro,
    Rupay,
}

impl From<CardTypeArg> for CardType {
    fn from(arg: CardTypeArg) -> Self {
        match arg {
            CardTypeArg::Amex => CardType::AmericanExpress,
            CardTypeArg::Visa => CardType::Visa,
            CardTypeArg::Mastercard => CardType::MasterCard,
            CardTypeArg::Discover => CardType::Discover,
            CardTypeArg::Diners => CardType::DinersClub,
            CardTypeArg::Jcb => CardType::Jcb,
            CardTypeArg::Maestro => CardType::Maestro,
            CardTypeArg::Rupay => CardType::RuPay,
        }
    }
}

#[derive(Serialize)]
struct ValidateOutput {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_type: Option<CardType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    masked: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            card_number,
            suggest,
            extended,
        } => cmd_classify(&card_number, suggest, scan(extended)),
        Commands::Checksum { card_number } => cmd_checksum(&card_number),
        Commands::Validate {
            card_number,
            extended,
            output,
        } => cmd_validate(&card_number, scan(extended), output),
        Commands::Format {
            card_number,
            separator,
        } => {
            println!("{}", format::format_with_separator(&card_number, &separator));
            ExitCode::SUCCESS
        }
        Commands::Mask { card_number } => {
            println!("{}", mask::mask_string(&card_number));
            ExitCode::SUCCESS
        }
        Commands::Generate {
            card_type,
            count,
            formatted,
        } => {
            for number in generate::generate_cards(card_type.into(), count) {
                if formatted {
                    println!("{}", format::format_card_number(&number));
                } else {
                    println!("{}", number);
                }
            }
            ExitCode::SUCCESS
        }
    }
}

fn scan(extended: bool) -> IssuerScan {
    if extended {
        IssuerScan::Extended
    } else {
        IssuerScan::Primary
    }
}

fn cmd_classify(card_number: &str, suggest: bool, scan: IssuerScan) -> ExitCode {
    let classifier = Classifier::new().suggest(suggest).scan(scan);
    match classifier.classify(card_number) {
        Ok(card_type) => {
            println!("Card Type: {}", card_type);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn cmd_checksum(card_number: &str) -> ExitCode {
    match cardcheck::validate_checksum(card_number) {
        Ok(()) => {
            println!("Checksum: PASS");
            ExitCode::SUCCESS
        }
        Err(_) => {
            println!("Checksum: FAIL");
            ExitCode::FAILURE
        }
    }
}

fn cmd_validate(card_number: &str, scan: IssuerScan, output: OutputFormat) -> ExitCode {
    let result = cardcheck::validate_with(card_number, Classifier::new().scan(scan));
    let (report, code) = match &result {
        Ok(card) => (
            ValidateOutput {
                valid: true,
                card_type: Some(card.card_type()),
                masked: Some(card.masked()),
                error: None,
            },
            ExitCode::SUCCESS,
        ),
        Err(e) => (
            ValidateOutput {
                valid: false,
                card_type: None,
                masked: None,
                error: Some(e.to_string()),
            },
            ExitCode::FAILURE,
        ),
    };

    match output {
        OutputFormat::Text => match &result {
            Ok(card) => {
                println!("Valid: yes");
                println!("Card Type: {}", card.card_type());
                println!("Masked: {}", card.masked());
            }
            Err(e) => {
                println!("Valid: no");
                println!("Error: {}", e);
            }
        },
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    code
}

fn fail(err: ValidationError) -> ExitCode {
    eprintln!("Error: {}", err);
    ExitCode::FAILURE
}
