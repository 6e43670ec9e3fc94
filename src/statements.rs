//! Financial statement producers: P&L, balance sheet, cash flow.
//!
//! Budget figures are drawn near actuals so variance columns stay in a
//! believable band. Derived lines (gross profit, EBITDA, net income, balance
//! totals, net cash change) are computed from their components, not drawn,
//! so every statement is internally consistent.

use rand::rngs::StdRng;
use rand::Rng;

use crate::generator::MockFeed;
use crate::model::{BalanceSheet, CashFlowStatement, PnlStatement, Section, VarianceLine};

/// Budget is drawn within ±8% of actual.
const BUDGET_SPREAD: f64 = 0.08;

fn draw_line(rng: &mut StdRng, lo: f64, hi: f64) -> VarianceLine {
    let actual = rng.gen_range(lo..=hi);
    let budget = actual * (1.0 + rng.gen_range(-BUDGET_SPREAD..=BUDGET_SPREAD));
    VarianceLine::new(round2(actual), round2(budget))
}

fn derived(components: &[&VarianceLine], signs: &[f64]) -> VarianceLine {
    let actual: f64 = components.iter().zip(signs).map(|(l, s)| l.actual * s).sum();
    let budget: f64 = components.iter().zip(signs).map(|(l, s)| l.budget * s).sum();
    VarianceLine::new(round2(actual), round2(budget))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl MockFeed {
    pub fn pnl(&mut self) -> PnlStatement {
        let rng = self.rng();

        let product = draw_line(rng, 60.0, 100.0);
        let services = draw_line(rng, 15.0, 35.0);
        let cogs = draw_line(rng, 25.0, 45.0);

        let rd = draw_line(rng, 12.0, 22.0);
        let sm = draw_line(rng, 14.0, 26.0);
        let ga = draw_line(rng, 6.0, 14.0);
        let da = draw_line(rng, 2.0, 6.0);

        let total_revenue = derived(&[&product, &services], &[1.0, 1.0]);
        let gross_profit = derived(&[&total_revenue, &cogs], &[1.0, -1.0]);
        let ebitda = derived(&[&gross_profit, &rd, &sm, &ga], &[1.0, -1.0, -1.0, -1.0]);
        let net_income = derived(&[&ebitda, &da], &[1.0, -1.0]);

        let mut revenue = Section::new();
        revenue.insert("Product Revenue".to_string(), product);
        revenue.insert("Services Revenue".to_string(), services);
        revenue.insert("Total Revenue".to_string(), total_revenue);

        let mut expenses = Section::new();
        expenses.insert("Cost of Goods Sold".to_string(), cogs);
        expenses.insert("Research & Development".to_string(), rd);
        expenses.insert("Sales & Marketing".to_string(), sm);
        expenses.insert("General & Administrative".to_string(), ga);
        expenses.insert("Depreciation & Amortization".to_string(), da);

        let mut totals = Section::new();
        totals.insert("Gross Profit".to_string(), gross_profit);
        totals.insert("EBITDA".to_string(), ebitda);
        totals.insert("Net Income".to_string(), net_income);

        PnlStatement {
            revenue,
            expenses,
            totals,
        }
    }

    /// Assets = liabilities + equity on the actual column: the equity plug
    /// line absorbs whatever the drawn lines leave over.
    pub fn balance_sheet(&mut self) -> BalanceSheet {
        let rng = self.rng();

        let cash = draw_line(rng, 20.0, 90.0);
        let receivables = draw_line(rng, 15.0, 45.0);
        let ppe = draw_line(rng, 30.0, 80.0);

        let payables = draw_line(rng, 10.0, 30.0);
        let debt = draw_line(rng, 20.0, 60.0);

        let common_stock = draw_line(rng, 10.0, 30.0);

        let total_assets = cash.actual + receivables.actual + ppe.actual;
        let total_liabilities = payables.actual + debt.actual;
        let retained_actual = round2(total_assets - total_liabilities - common_stock.actual);
        let retained_budget = round2(
            cash.budget + receivables.budget + ppe.budget
                - payables.budget
                - debt.budget
                - common_stock.budget,
        );
        let retained = VarianceLine::new(retained_actual, retained_budget);

        let mut assets = Section::new();
        assets.insert("Cash & Equivalents".to_string(), cash);
        assets.insert("Accounts Receivable".to_string(), receivables);
        assets.insert("Property & Equipment".to_string(), ppe);

        let mut liabilities = Section::new();
        liabilities.insert("Accounts Payable".to_string(), payables);
        liabilities.insert("Long-term Debt".to_string(), debt);

        let mut equity = Section::new();
        equity.insert("Common Stock".to_string(), common_stock);
        equity.insert("Retained Earnings".to_string(), retained);

        BalanceSheet {
            assets,
            liabilities,
            equity,
        }
    }

    pub fn cash_flow(&mut self) -> CashFlowStatement {
        let rng = self.rng();

        let net_income = draw_line(rng, 5.0, 25.0);
        let working_capital = draw_line(rng, -8.0, 8.0);

        let capex = draw_line(rng, -12.0, -3.0);

        let debt_issued = draw_line(rng, 0.0, 10.0);
        let buybacks = draw_line(rng, -6.0, 0.0);

        let mut operating = Section::new();
        operating.insert("Net Income".to_string(), net_income);
        operating.insert("Working Capital Changes".to_string(), working_capital);

        let mut investing = Section::new();
        investing.insert("Capital Expenditures".to_string(), capex);

        let mut financing = Section::new();
        financing.insert("Debt Issued".to_string(), debt_issued);
        financing.insert("Share Buybacks".to_string(), buybacks);

        let net_change = derived(
            &[&net_income, &working_capital, &capex, &debt_issued, &buybacks],
            &[1.0, 1.0, 1.0, 1.0, 1.0],
        );

        CashFlowStatement {
            operating,
            investing,
            financing,
            net_change,
        }
    }
}
