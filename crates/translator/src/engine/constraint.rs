// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! WHERE, HAVING and ON conditions

use adql_sql_ir::{Constraint, ConstraintList, InValues};

use super::SqlTranslator;
use crate::dialect::SqlDialect;
use crate::error::TranslationResult;

impl<D: SqlDialect> SqlTranslator<D> {
    /// Translate a constraint list: `a = 1 AND b IS NULL OR ...`
    pub fn translate_constraints(&self, constraints: &ConstraintList) -> TranslationResult<String> {
        let mut sql = String::new();
        for (connector, constraint) in constraints.iter() {
            if let Some(connector) = connector {
                sql.push(' ');
                sql.push_str(connector.keyword());
                sql.push(' ');
            }
            sql.push_str(&self.translate_constraint(constraint)?);
        }
        Ok(sql)
    }

    pub fn translate_constraint(&self, constraint: &Constraint) -> TranslationResult<String> {
        let not = |negated: bool| if negated { "NOT " } else { "" };

        let sql = match constraint {
            Constraint::Comparison { left, op, right } => format!(
                "{} {} {}",
                self.translate_operand(left)?,
                op.symbol(),
                self.translate_operand(right)?
            ),
            Constraint::Between {
                operand,
                low,
                high,
                negated,
            } => format!(
                "{} {}BETWEEN {} AND {}",
                self.translate_operand(operand)?,
                not(*negated),
                self.translate_operand(low)?,
                self.translate_operand(high)?
            ),
            Constraint::IsNull { operand, negated } => format!(
                "{} IS {}NULL",
                self.translate_operand(operand)?,
                not(*negated)
            ),
            Constraint::In {
                operand,
                values,
                negated,
            } => {
                let values = match values {
                    InValues::List(list) => self.translate_operands(list)?.join(", "),
                    InValues::SubQuery(query) => self.translate_query(query)?,
                };
                format!(
                    "{} {}IN ({})",
                    self.translate_operand(operand)?,
                    not(*negated),
                    values
                )
            }
            Constraint::Exists(query) => format!("EXISTS({})", self.translate_query(query)?),
            Constraint::Not(inner) => format!("NOT {}", self.translate_constraint(inner)?),
            Constraint::Group(list) => format!("({})", self.translate_constraints(list)?),
        };
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::AnsiDialect;
    use adql_sql_ir::{ComparisonOp, Operand, Query, TableRef};

    fn translator() -> SqlTranslator<AnsiDialect> {
        SqlTranslator::new(AnsiDialect::new())
    }

    #[test]
    fn test_connectors() {
        let list = ConstraintList::new(Constraint::equals(Operand::column("a"), Operand::integer(1)))
            .and(Constraint::comparison(
                Operand::column("b"),
                ComparisonOp::Like,
                Operand::string("x%"),
            ))
            .or(Constraint::Group(
                ConstraintList::new(Constraint::IsNull {
                    operand: Operand::column("c"),
                    negated: true,
                })
                .and(Constraint::Not(Box::new(Constraint::comparison(
                    Operand::column("d"),
                    ComparisonOp::GtEq,
                    Operand::integer(2),
                )))),
            ));

        assert_eq!(
            translator().translate_constraints(&list).unwrap(),
            "a = 1 AND b LIKE 'x%' OR (c IS NOT NULL AND NOT d >= 2)"
        );
    }

    #[test]
    fn test_between_and_in() {
        let t = translator();
        let between = Constraint::Between {
            operand: Operand::column("x"),
            low: Operand::integer(1),
            high: Operand::integer(5),
            negated: true,
        };
        assert_eq!(
            t.translate_constraint(&between).unwrap(),
            "x NOT BETWEEN 1 AND 5"
        );

        let in_list = Constraint::In {
            operand: Operand::column("x"),
            values: InValues::List(vec![Operand::integer(1), Operand::string("a")]),
            negated: false,
        };
        assert_eq!(t.translate_constraint(&in_list).unwrap(), "x IN (1, 'a')");
    }

    #[test]
    fn test_sub_queries() {
        let t = translator();
        let sub = Query::new(TableRef::named("bar"));

        let in_query = Constraint::In {
            operand: Operand::column("id"),
            values: InValues::SubQuery(Box::new(sub.clone())),
            negated: true,
        };
        assert_eq!(
            t.translate_constraint(&in_query).unwrap(),
            "id NOT IN (SELECT *\nFROM bar)"
        );

        let exists = Constraint::Exists(Box::new(sub));
        assert_eq!(
            t.translate_constraint(&exists).unwrap(),
            "EXISTS(SELECT *\nFROM bar)"
        );
    }
}
