//! Interactive menu: shows the current quotes and converts amounts to pesos.

use super::ui;
use crate::core::{Currency, Quote, QuoteProvider, format_money, parse_amount};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    ShowRates,
    Convert(Currency),
    Exit,
}

impl FromStr for MenuOption {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuOption::ShowRates),
            "2" => Ok(MenuOption::Convert(Currency::Usd)),
            "3" => Ok(MenuOption::Convert(Currency::Eur)),
            "4" => Ok(MenuOption::Convert(Currency::Brl)),
            "5" => Ok(MenuOption::Exit),
            _ => Err(anyhow::anyhow!("Invalid menu option: {}", s.trim())),
        }
    }
}

/// Whether the session goes on after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<'a, R, W> {
    provider: &'a dyn QuoteProvider,
    input: R,
    output: W,
    colors: bool,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(provider: &'a dyn QuoteProvider, input: R, output: W) -> Self {
        Self {
            provider,
            input,
            output,
            colors: false,
        }
    }

    /// Enables ANSI styling. Only set this when the output is a terminal.
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Runs the menu loop until the user exits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to the currency converter!")?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("\nSelect an option (1-5): ")? else {
                debug!("Input closed at menu");
                break;
            };

            let flow = match choice.parse::<MenuOption>() {
                Ok(MenuOption::ShowRates) => {
                    self.show_all_rates().await?;
                    Flow::Continue
                }
                Ok(MenuOption::Convert(currency)) => self.convert(currency.code()).await?,
                Ok(MenuOption::Exit) => {
                    writeln!(self.output, "\nThanks for using the converter. Goodbye!")?;
                    break;
                }
                Err(e) => {
                    debug!(error = %e, "Rejected menu input");
                    writeln!(
                        self.output,
                        "{}",
                        ui::style_text(
                            "Invalid option. Please choose an option from 1 to 5.",
                            ui::StyleType::Error,
                            self.colors,
                        )
                    )?;
                    Flow::Continue
                }
            };

            let pause = format!(
                "\n{}",
                ui::style_text(
                    "Press Enter to continue...",
                    ui::StyleType::Subtle,
                    self.colors,
                )
            );
            if flow == Flow::Exit || self.prompt(&pause)?.is_none() {
                break;
            }
        }

        info!("Session finished");
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        let line = ui::separator();
        writeln!(self.output, "\n{line}")?;
        writeln!(
            self.output,
            "{}",
            ui::style_text("CURRENCY CONVERTER", ui::StyleType::Title, self.colors)
        )?;
        writeln!(self.output, "{line}")?;
        writeln!(self.output, "1. Show current rates")?;
        writeln!(self.output, "2. Convert USD to ARS")?;
        writeln!(self.output, "3. Convert EUR to ARS")?;
        writeln!(self.output, "4. Convert BRL to ARS")?;
        writeln!(self.output, "5. Exit")?;
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Fetches every quote and prints them together. A failed lookup only
    /// affects its own row.
    pub async fn show_all_rates(&mut self) -> Result<()> {
        writeln!(self.output, "\nFetching current rates...")?;

        let pb = ui::new_spinner("Fetching quotes...");
        let (usd, eur, brl) = futures::join!(
            self.provider.get_quote(Currency::Usd),
            self.provider.get_quote(Currency::Eur),
            self.provider.get_quote(Currency::Brl),
        );
        pb.finish_and_clear();

        let mut rows = Vec::with_capacity(Currency::QUOTED.len());
        let mut unavailable = Vec::new();
        for (currency, result) in Currency::QUOTED.into_iter().zip([usd, eur, brl]) {
            match result {
                Ok(quote) => rows.push((currency, Some(quote))),
                Err(e) => {
                    warn!(error = %e, %currency, "Quote lookup failed");
                    rows.push((currency, None));
                    unavailable.push(currency);
                }
            }
        }

        writeln!(self.output, "{}", ui::quote_table(&rows, self.colors))?;
        for currency in unavailable {
            self.print_unavailable(currency)?;
        }
        Ok(())
    }

    /// Converts an amount of `currency_code` to pesos at both buy and sell prices.
    pub async fn convert(&mut self, currency_code: &str) -> Result<Flow> {
        let currency = match currency_code.parse::<Currency>() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Conversion requested for unsupported currency");
                writeln!(
                    self.output,
                    "{}",
                    ui::style_text("Invalid currency.", ui::StyleType::Error, self.colors)
                )?;
                return Ok(Flow::Continue);
            }
        };

        writeln!(self.output, "\nFetching the {currency} quote...")?;
        let quote = match self.provider.get_quote(currency).await {
            Ok(q) => q,
            Err(e) => {
                warn!(error = %e, %currency, "Quote lookup failed");
                self.print_unavailable(currency)?;
                return Ok(Flow::Continue);
            }
        };

        let table = ui::quote_table(&[(currency, Some(quote))], self.colors);
        writeln!(self.output, "{table}")?;

        let Some(amount) = self.read_amount(currency)? else {
            return Ok(Flow::Exit);
        };
        self.print_conversion(currency, amount, &quote)?;
        Ok(Flow::Continue)
    }

    /// Prompts until a valid non-negative amount is entered. `None` on end of input.
    fn read_amount(&mut self, currency: Currency) -> Result<Option<f64>> {
        let question = format!(
            "\nEnter the amount of {} to convert: ",
            currency.plural()
        );
        loop {
            let Some(entry) = self.prompt(&question)? else {
                return Ok(None);
            };
            match parse_amount(&entry) {
                Ok(amount) => return Ok(Some(amount)),
                Err(e) => {
                    writeln!(
                        self.output,
                        "{}",
                        ui::style_text(&e.to_string(), ui::StyleType::Error, self.colors)
                    )?;
                    writeln!(self.output, "Please try again.")?;
                }
            }
        }
    }

    fn print_conversion(&mut self, currency: Currency, amount: f64, quote: &Quote) -> Result<()> {
        let ars = Currency::Ars.code();
        let at_buy = format_money(amount * quote.buy, ars);
        let at_sell = format_money(amount * quote.sell, ars);
        writeln!(
            self.output,
            "\n{}",
            ui::style_text("CONVERSION RESULT", ui::StyleType::Title, self.colors)
        )?;
        writeln!(
            self.output,
            "{} {}",
            ui::style_text("Amount:", ui::StyleType::Label, self.colors),
            format_money(amount, currency.code())
        )?;
        writeln!(
            self.output,
            "{} {}",
            ui::style_text("At buy price:", ui::StyleType::Label, self.colors),
            ui::style_text(&at_buy, ui::StyleType::Value, self.colors)
        )?;
        writeln!(
            self.output,
            "{} {}",
            ui::style_text("At sell price:", ui::StyleType::Label, self.colors),
            ui::style_text(&at_sell, ui::StyleType::Value, self.colors)
        )?;
        Ok(())
    }

    fn print_unavailable(&mut self, currency: Currency) -> Result<()> {
        let notice = format!("Could not fetch the {} quote", currency.label());
        let notice = ui::style_text(&notice, ui::StyleType::Error, self.colors);
        writeln!(self.output, "{notice}")?;
        Ok(())
    }

    /// Writes `question` and reads one line. `None` once input is exhausted.
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
