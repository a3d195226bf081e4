#[cfg(test)]
pub const BLOG_POST_MD: &str = "---
title: Zero-Downtime Deploys on EKS
date: 2025-06-15
excerpt: Rolling updates, readiness gates and the one check everybody forgets.
tags:
  - kubernetes
  - aws
metaDescription: How to ship to EKS without dropping requests.
---

Most outages during a deploy are self-inflicted.

## Getting Started

Start with readiness checks.

### Readiness timing

Tune `periodSeconds` before anything else.

## Rolling Out

<div class=\"callout\">Watch the surge settings.</div>
";

#[cfg(test)]
pub const CASE_STUDY_MD: &str = "---
title: Fintech Platform Migration to AWS
slug: fintech-aws-migration
date: 2024-11-02
client: Series B Fintech
industry: Financial Services
excerpt: Moved a monolith onto EKS with zero customer-facing downtime.
tags: [aws, eks, terraform]
results:
  - metric: Deploy frequency
    outcome: Weekly to 12x per day
  - metric: Infra cost
    outcome: Down 38%
architecture:
  - Route 53 and CloudFront at the edge
  - ALB into NGINX ingress on EKS
  - RDS PostgreSQL Multi-AZ
---

## The Challenge

Releases needed a maintenance window.

## The Solution

Everything moved behind Terraform modules.
";

