//! Till Shell
//!
//! Interactive menu over any line reader and writer. Expected failures (bad input,
//! invalid transitions) are reported to the operator and the loop carries on; storage
//! failures end the session.

use std::{
    fmt,
    io::{self, BufRead, Write},
};

use thiserror::Error;
use tracing::info;

use crate::{
    access::{AccessGate, PasswordGate},
    input::parse_number,
    orders::{Order, OrderDay},
    receipt::{ReceiptError, ReceiptPrinter},
    store::OrderStore,
    till::{NumberedOrder, OrderError, OrderService},
};

const MENU: &str = "
Menu:
1. Add Item to Order
2. Finalize Order
3. View Pending Orders
4. Worker: Fulfill an Order
5. Manager: View One-Line Summary for a Given Day of the Week
6. Exit";

/// Errors that end a till session.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading input or writing output failed.
    #[error("terminal I/O failed")]
    Io(#[from] io::Error),

    /// A receipt could not be written.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// The order service failed in a way the operator cannot fix.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// What the operator picked from the menu.
enum Choice {
    AddItem,
    Finalize,
    Pending,
    Fulfill,
    DaySummary,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Choice::AddItem),
            "2" => Some(Choice::Finalize),
            "3" => Some(Choice::Pending),
            "4" => Some(Choice::Fulfill),
            "5" => Some(Choice::DaySummary),
            "6" => Some(Choice::Exit),
            _ => None,
        }
    }
}

/// A till session: one in-progress order at a time.
#[derive(Debug)]
pub struct Shell<S, R, W, G = PasswordGate> {
    service: OrderService<S, G>,
    printer: ReceiptPrinter,
    today: OrderDay,
    order: Order,
    input: R,
    output: W,
}

impl<S, R, W, G> Shell<S, R, W, G>
where
    S: OrderStore,
    R: BufRead,
    W: Write,
    G: AccessGate,
{
    /// Create a session taking orders for `today`.
    pub fn new(
        service: OrderService<S, G>,
        printer: ReceiptPrinter,
        today: OrderDay,
        input: R,
        output: W,
    ) -> Self {
        Self {
            service,
            printer,
            today,
            order: Order::new(today),
            input,
            output,
        }
    }

    /// The order service behind the session.
    pub fn service(&self) -> &OrderService<S, G> {
        &self.service
    }

    /// The in-progress order.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Consume the session, returning its output.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu until the operator exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns a [`ShellError`] if the terminal or the order store fails.
    pub fn run(&mut self) -> Result<(), ShellError> {
        writeln!(self.output, "Welcome to the Café!")?;
        writeln!(self.output, "Today is {}.", self.today)?;

        loop {
            writeln!(self.output, "{MENU}")?;

            let Some(line) = self.prompt("Choose an option: ")? else {
                break;
            };

            let keep_going = match Choice::parse(line.trim()) {
                Some(Choice::AddItem) => self.add_item()?,
                Some(Choice::Finalize) => self.finalize()?,
                Some(Choice::Pending) => self.pending()?,
                Some(Choice::Fulfill) => self.fulfill()?,
                Some(Choice::DaySummary) => self.day_summary()?,
                Some(Choice::Exit) => false,
                None => {
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        writeln!(self.output, "Come again soon!")?;

        Ok(())
    }

    fn add_item(&mut self) -> Result<bool, ShellError> {
        writeln!(self.output, "\nAvailable Products:")?;
        self.printer
            .write_products(&mut self.output, self.service.list_products())?;

        let Some(product) = self.prompt("Enter product ID: ")? else {
            return Ok(false);
        };

        let Some(quantity) = self.prompt("Enter quantity: ")? else {
            return Ok(false);
        };

        let result =
            self.service
                .process_order_input(&mut self.order, product.trim(), quantity.trim());

        self.report(result)?;

        Ok(true)
    }

    fn finalize(&mut self) -> Result<bool, ShellError> {
        self.order.set_day(self.today);

        match self.service.finalize(&self.order) {
            Ok(finalized) => {
                self.printer.write_order(
                    &mut self.output,
                    &format!("Order #{}", finalized.number),
                    &self.order,
                )?;

                writeln!(self.output, "{finalized}")?;

                self.order = Order::new(self.today);
            }
            Err(err) => self.report_error(err)?,
        }

        Ok(true)
    }

    fn pending(&mut self) -> Result<bool, ShellError> {
        let pending = self.service.numbered_pending_orders()?;

        writeln!(self.output, "\nPending Orders:")?;

        if pending.is_empty() {
            writeln!(self.output, "No pending orders.")?;
        }

        self.write_numbered(&pending)?;

        Ok(true)
    }

    fn write_numbered(&mut self, orders: &[NumberedOrder]) -> Result<(), ShellError> {
        for numbered in orders {
            self.printer.write_order(
                &mut self.output,
                &format!("Order #{}", numbered.number),
                &numbered.order,
            )?;
        }

        Ok(())
    }

    fn fulfill(&mut self) -> Result<bool, ShellError> {
        let orders = self.service.numbered_orders()?;

        writeln!(self.output, "\nAll Orders:")?;

        if orders.is_empty() {
            writeln!(self.output, "No orders found.")?;

            return Ok(true);
        }

        self.write_numbered(&orders)?;

        let Some(number) = self.prompt("\nEnter the order number you want to fulfill: ")? else {
            return Ok(false);
        };

        let result = self.service.fulfill_by_number(number.trim());

        self.report(result)?;

        Ok(true)
    }

    fn day_summary(&mut self) -> Result<bool, ShellError> {
        let Some(password) = self.prompt("Enter manager password: ")? else {
            return Ok(false);
        };

        if !self.service.check_manager_password(&password) {
            writeln!(self.output, "Incorrect password. Access denied.")?;

            return Ok(true);
        }

        let Some(day) = self.prompt(
            "\nSelect a day of the week (1=Monday, 2=Tuesday, 3=Wednesday, 4=Thursday, \
             5=Friday, 6=Saturday, 7=Sunday): ",
        )?
        else {
            return Ok(false);
        };

        let Some(day) = parse_number(day.trim())
            .ok()
            .and_then(OrderDay::from_number)
        else {
            writeln!(self.output, "Choose a number between 1 and 7.")?;

            return Ok(true);
        };

        info!(%day, "manager viewed day summary");

        match self.service.day_summary(day) {
            Ok(lines) => self
                .printer
                .write_day_summary(&mut self.output, day, &lines)?,
            Err(err) => self.report_error(err)?,
        }

        Ok(true)
    }

    /// Write `message`, then read one line without its terminator. `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, ShellError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);

        Ok(Some(line))
    }

    fn report<T: fmt::Display>(&mut self, result: Result<T, OrderError>) -> Result<(), ShellError> {
        match result {
            Ok(outcome) => writeln!(self.output, "{outcome}")?,
            Err(err) => self.report_error(err)?,
        }

        Ok(())
    }

    fn report_error(&mut self, err: OrderError) -> Result<(), ShellError> {
        if matches!(err, OrderError::Storage(_)) {
            return Err(err.into());
        }

        writeln!(self.output, "Error: {err}")?;

        Ok(())
    }
}
